//! Pending-queue inspection commands.

use clap::Subcommand;
use rollcall_core::AttendanceQueue;

#[derive(Subcommand)]
pub enum QueueAction {
    /// List records awaiting delivery
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show pending count and delivery mode
    Status,
}

/// Run the queue command.
pub fn run(action: QueueAction) -> Result<(), Box<dyn std::error::Error>> {
    let queue = AttendanceQueue::open()?;

    match action {
        QueueAction::List { json } => {
            let pending = queue.pending()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&pending)?);
            } else if pending.is_empty() {
                println!("No attendance records pending.");
            } else {
                for record in pending {
                    println!(
                        "{}  {}  {}  user={} course={} ({})",
                        record.id,
                        record.date,
                        record.status,
                        record.user_id,
                        record.course_id,
                        record.method
                    );
                }
            }
        }
        QueueAction::Status => {
            let status = queue.status()?;
            println!("Pending records: {}", status.pending_count);
            println!("Delivery: {}", status.delivery);
        }
    }

    Ok(())
}
