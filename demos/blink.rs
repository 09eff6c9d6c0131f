use cosched::{task, MonotonicClock, SchedulerBuilder, TaskContext};
use std::sync::atomic::{AtomicU32, Ordering};

static BLINKS: AtomicU32 = AtomicU32::new(0);

/// Toggles the "LED" every 500 milliseconds
#[task(period = "500ms")]
fn blink(ctx: &mut TaskContext<'_>) {
    let count = BLINKS.fetch_add(1, Ordering::SeqCst) + 1;
    let led = if count % 2 == 1 { "ON " } else { "OFF" };
    println!("[{:>6}] 💡 [BLINK] LED {} (#{})", ctx.timestamp(), led, count);
}

/// Prints a status line every 2 seconds, starting after 1 second
#[task(delay = "1s", period = "2s")]
fn status(ctx: &mut TaskContext<'_>) {
    println!(
        "[{:>6}] 📊 [STATUS] {} blinks so far",
        ctx.timestamp(),
        BLINKS.load(Ordering::SeqCst)
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .with_target(false)
        .init();

    println!("🚀 Starting blink example (1 tick = 1 ms)...\n");

    let scheduler = SchedulerBuilder::new(MonotonicClock::new(1000))
        .register_all()
        .build::<4>()?;

    let handle = scheduler.spawn();

    println!("✅ Press Ctrl+C to stop.\n");
    tokio::signal::ctrl_c().await?;

    println!("\n👋 Shutting down...");
    let scheduler = handle.shutdown().await?;
    println!(
        "Stopped at tick {} after {} blinks",
        scheduler.timestamp(),
        BLINKS.load(Ordering::SeqCst)
    );
    Ok(())
}
