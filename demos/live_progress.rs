//! Live Progress Demo: Redraws a multi-line status block in place.
//!
//! Three worker threads report progress through a render actor while the
//! block above the prompt updates without scrolling.

use liveframe::{FrameRenderer, RendererActor};
use std::fmt::Write;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];
const BAR_WIDTH: usize = 30;

fn bar(percent: u32) -> String {
    let filled = BAR_WIDTH * percent as usize / 100;
    format!("[{}{}] {percent:>3}%", "=".repeat(filled), " ".repeat(BAR_WIDTH - filled))
}

fn main() -> liveframe::Result<()> {
    println!("Liveframe Progress Demo");
    println!("=======================");

    let actor = RendererActor::spawn(FrameRenderer::stdout())?;
    let progress: Arc<[AtomicU32; 3]> = Arc::new(Default::default());

    let workers: Vec<_> = (0..3)
        .map(|i| {
            let progress = Arc::clone(&progress);
            thread::spawn(move || {
                for pct in 0..=100 {
                    progress[i].store(pct, Ordering::Relaxed);
                    thread::sleep(Duration::from_millis(20 + 15 * i as u64));
                }
            })
        })
        .collect();

    let mut tick = 0usize;
    loop {
        let mut frame = String::new();
        let _ = write!(frame, "{} downloading", SPINNER[tick % SPINNER.len()]);
        let mut finished = true;
        for (i, slot) in progress.iter().enumerate() {
            let pct = slot.load(Ordering::Relaxed);
            finished &= pct == 100;
            let _ = write!(frame, "\n  worker {i}  {}", bar(pct));
        }

        if finished {
            actor.render(frame.replacen(SPINNER[tick % SPINNER.len()], "*", 1))?;
            break;
        }
        actor.render(frame)?;
        tick += 1;
        thread::sleep(Duration::from_millis(50));
    }

    for worker in workers {
        if worker.join().is_err() {
            eprintln!("Worker thread panicked");
        }
    }

    actor.done()?;
    let stats = actor.shutdown()?;
    println!(
        "{} frames, {} lines written, {} skipped, {} bytes",
        stats.frames, stats.lines_written, stats.lines_skipped, stats.bytes_written
    );
    Ok(())
}
