//! Tasks that steer themselves and each other, driven by a simulated clock.
//!
//! - `sampler` runs every 10 ticks and wakes `handler` on every third sample
//! - `handler` sleeps blocked until woken, then blocks itself again
//! - `connect` retries with a growing back-off and removes itself once connected

use cosched::{ManualClock, Scheduler, TaskContext, TaskId, Ticks};
use std::cell::Cell;

thread_local! {
    static HANDLER: Cell<Option<TaskId>> = const { Cell::new(None) };
    static SAMPLES: Cell<u32> = const { Cell::new(0) };
    static ATTEMPTS: Cell<Ticks> = const { Cell::new(0) };
}

fn sampler(ctx: &mut TaskContext<'_>) {
    let n = SAMPLES.with(|s| {
        s.set(s.get() + 1);
        s.get()
    });
    println!("[{:>4}] 📈 [SAMPLER] sample #{}", ctx.timestamp(), n);

    if n % 3 == 0 {
        if let Some(handler) = HANDLER.with(Cell::get) {
            ctx.ready(handler).ok();
        }
    }
}

fn handler(ctx: &mut TaskContext<'_>) {
    println!("[{:>4}] ⚙️  [HANDLER] processing batch", ctx.timestamp());
    ctx.block_self().ok();
}

fn connect(ctx: &mut TaskContext<'_>) {
    let attempt = ATTEMPTS.with(|a| {
        a.set(a.get() + 1);
        a.get()
    });

    if attempt < 4 {
        let backoff = attempt * 7;
        println!(
            "[{:>4}] 🔌 [CONNECT] attempt {} failed, retrying in {} ticks",
            ctx.timestamp(),
            attempt,
            backoff
        );
        ctx.delay_self(backoff).ok();
    } else {
        println!("[{:>4}] ✅ [CONNECT] connected, removing task", ctx.timestamp());
        ctx.remove_self();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .with_target(false)
        .init();

    let clock = ManualClock::new(0);
    let mut scheduler = Scheduler::<_, 4>::new(clock.clone());
    scheduler.init();

    scheduler.add_named("sampler", sampler, 0, 10)?;
    let handler = scheduler.add_named("handler", handler, Ticks::MAX, 0)?;
    scheduler.add_named("connect", connect, 0, 0)?;
    HANDLER.with(|h| h.set(Some(handler)));

    println!("🚀 Simulating 100 ticks...\n");

    while clock.get() <= 100 {
        let sleep = scheduler.run_cycle();
        // jump straight to the next due task instead of sleeping
        clock.advance(sleep.clamp(1, 100));
    }

    println!("\n📋 Remaining tasks:");
    for (id, state) in scheduler.tasks() {
        println!("   • {:<8} {:?}", scheduler.name(id).unwrap_or("?"), state);
    }
    Ok(())
}
