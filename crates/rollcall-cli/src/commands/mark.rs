//! Capture an attendance record into the offline queue.

use chrono::Utc;
use clap::Args;
use rollcall_core::{AttendanceDraft, AttendanceQueue};

#[derive(Args)]
pub struct MarkArgs {
    /// Enrollment the attendance applies to
    #[arg(long)]
    pub enrollment: String,
    /// User being marked
    #[arg(long)]
    pub user: String,
    /// Course the enrollment belongs to
    #[arg(long)]
    pub course: String,
    /// Calendar date (defaults to today, UTC)
    #[arg(long)]
    pub date: Option<String>,
    /// Attendance outcome (present, absent, late, ...)
    #[arg(long, default_value = "present")]
    pub status: String,
    /// Capture method
    #[arg(long, default_value = "manual")]
    pub method: String,
    /// Print the stored record as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the mark command.
pub fn run(args: MarkArgs) -> Result<(), Box<dyn std::error::Error>> {
    let queue = AttendanceQueue::open()?;

    let date = args
        .date
        .unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string());

    let record = queue.enqueue(AttendanceDraft {
        enrollment_id: args.enrollment,
        user_id: args.user,
        course_id: args.course,
        date,
        status: args.status,
        method: args.method,
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        let status = queue.status()?;
        println!("Queued attendance {}", record.id);
        println!("Delivery: {}", status.delivery);
    }

    Ok(())
}
