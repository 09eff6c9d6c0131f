use cosched::cosched_runtime::load_toml_config;
use cosched::{task, MonotonicClock, SchedulerBuilder, SchedulerConfig, TaskContext};

/// Period comes from the config file (shorthand value "250ms")
#[task(period = "${app.sensor.period}")]
fn sample_sensor(ctx: &mut TaskContext<'_>) {
    println!("[{:>6}] 🌡️  [SENSOR] sampling", ctx.timestamp());
}

/// Bare numbers from config use the declared time unit
#[task(delay = "${app.report.delay:1}", period = "${app.report.period}", time_unit = TimeUnit::Seconds)]
fn report(ctx: &mut TaskContext<'_>) {
    println!("[{:>6}] 📝 [REPORT] writing report", ctx.timestamp());
}

/// Disabled unless `app.debug.enabled = true`
#[task(period = "1s", enabled = "${app.debug.enabled:false}")]
fn debug_dump(ctx: &mut TaskContext<'_>) {
    println!("[{:>6}] 🐞 [DEBUG] dumping state", ctx.timestamp());
}

/// Starts blocked; nothing wakes it in this demo
#[task(delay = "${app.alarm.delay:blocked}")]
fn alarm(ctx: &mut TaskContext<'_>) {
    println!("[{:>6}] 🚨 [ALARM] triggered", ctx.timestamp());
    ctx.block_self().ok();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string()))
        .with_target(false)
        .init();

    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../demos/config/application.toml");
    let config = load_toml_config(path)?;
    let settings = SchedulerConfig::from_config(&config)?;

    println!("🚀 Starting with-config example...\n");
    println!("📝 Configuration ({}):", path);
    println!("   - scheduler.tick_hz: {}", settings.tick_hz);
    println!("   - app.sensor.period: sensor interval");
    println!("   - app.debug.enabled: enable/disable debug_dump");
    println!("   - override with e.g. APP_APP__SENSOR__PERIOD=100ms\n");

    let scheduler = SchedulerBuilder::with_config(MonotonicClock::new(settings.tick_hz), config)
        .register_all()
        .build::<8>()?;

    for (id, state) in scheduler.tasks() {
        println!(
            "   • {:<14} {:?} period {:?}",
            scheduler.name(id).unwrap_or("?"),
            state,
            scheduler.period(id)
        );
    }

    let handle = scheduler.spawn();

    println!("\n✅ Press Ctrl+C to stop.\n");
    tokio::signal::ctrl_c().await?;

    println!("\n👋 Shutting down...");
    handle.shutdown().await?;
    Ok(())
}
