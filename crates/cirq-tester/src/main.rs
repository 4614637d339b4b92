//! Interactive queue exerciser. Runs a line-oriented REPL against a
//! live [`CircularQueue`] of strings whose destructor hook logs every
//! entry the queue destroys, so eviction and drop behavior can be
//! watched directly. Run with `RUST_LOG=trace` to also see the
//! queue's internal growth and eviction logging.

use clap::Parser;
use log::{LevelFilter, info, warn};

use cirq::{CircularQueue, DestroyFn, QueueFlags};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

#[derive(Parser, Debug)]
struct Args {
    /// Queue capacity. Zero selects a growable queue.
    #[arg(long, default_value_t = 0)]
    capacity: usize,
    /// Destroy the oldest entry instead of failing when full.
    #[arg(long)]
    overwrite: bool,
}

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let mut flags = QueueFlags::empty();
    if args.overwrite {
        flags |= QueueFlags::OVERWRITE;
    }

    let hook: DestroyFn<String> = Box::new(|entry| warn!("destroyed entry: {entry}"));
    let mut queue = CircularQueue::new(args.capacity, Some(hook), flags).unwrap();
    info!("queue ready: {queue:?}");

    let mut rl = DefaultEditor::new().unwrap();
    loop {
        let line = match rl.readline("cirq> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                warn!("readline failed: {err}");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line);

        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
        match cmd {
            "push" => {
                if rest.is_empty() {
                    println!("usage: push <text>");
                } else {
                    match queue.push(rest.to_string()) {
                        Ok(()) => println!("ok ({} queued)", queue.len()),
                        Err(err) => println!("push rejected: {err}"),
                    }
                }
            }
            "pop" => match queue.pop() {
                Some(entry) => println!("popped: {entry}"),
                None => println!("(empty)"),
            },
            "list" => {
                if queue.is_empty() {
                    println!("(empty)");
                } else {
                    for (i, entry) in queue.iter().enumerate() {
                        println!("{i:3}: {entry}");
                    }
                }
            }
            "drain" => {
                let mut drained = 0;
                while let Some(entry) = queue.pop() {
                    println!("popped: {entry}");
                    drained += 1;
                }
                println!("drained {drained} entries");
            }
            "stats" => println!("{queue:?}"),
            "help" => {
                println!("commands:");
                println!("  push <text>   enqueue an entry");
                println!("  pop           dequeue the oldest entry");
                println!("  list          show queued entries, oldest first");
                println!("  drain         pop until empty");
                println!("  stats         queue state");
                println!("  quit          leave (destroys queued entries)");
            }
            "quit" | "exit" => break,
            other => println!("unknown command: {other} (try help)"),
        }
    }

    // Dropping the queue here destroys whatever is still queued; each
    // entry shows up once through the hook's log line.
    info!("bye");
}
