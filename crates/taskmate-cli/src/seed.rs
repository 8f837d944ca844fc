//! Sample tasks inserted by the `seed` command.

use taskmate_core::NewTask;

const SAMPLE_TASKS: &[(&str, &str, &str, &str, &str)] = &[
    ("Visit the doctor", "Book and attend the yearly check-up.", "Health", "01.11.2023", "Medium"),
    ("Pay the bills", "Pay this month's utility bills.", "Personal", "15.10.2023", "High"),
    ("Update resume", "Refresh the resume before the job search.", "Career", "10.11.2023", "Medium"),
    ("Plant flowers", "Plant spring bulbs in the garden.", "Home", "05.11.2023", "Low"),
    ("Organize a meeting", "Set up a meeting with the team.", "Work", "25.10.2023", "High"),
    ("Learn a language", "Spend 30 minutes on Spanish lessons.", "Education", "30.10.2023", "Medium"),
    ("Review the report", "Review the quarterly report and send feedback.", "Work", "18.10.2023", "High"),
    ("Cook dinner", "Cook dinner for the family.", "Personal", "14.10.2023", "Low"),
    ("Visit the museum", "See the new exhibition at the local museum.", "Leisure", "15.11.2023", "Low"),
    ("Prepare for winter", "Buy winter supplies and get the house ready.", "Home", "20.11.2023", "High"),
];

/// The fixed list of sample tasks.
pub fn sample_tasks() -> Vec<NewTask> {
    SAMPLE_TASKS
        .iter()
        .map(|&(title, description, category, due_date, priority)| {
            NewTask::new(title, description, category, due_date, priority)
        })
        .collect()
}
