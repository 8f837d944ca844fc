//! Interactive shell.
//!
//! Reads one command per line and walks the user through each operation
//! with prompts. Answering `q` at any prompt cancels the current operation.
//! A failed operation prints its error and the loop carries on.

use std::{
    collections::HashSet,
    io::{BufRead, Write},
};

use anyhow::{Context, Result};
use taskmate_core::{
    Categories, CreateResult, DeleteResult, NewTask, SearchFilter, Selector, TaskChanges,
    TaskError, TaskField, TaskStore, Tasks, UpdateResult,
};

use crate::{
    cli::index_warning,
    input::{is_cancel, is_valid_due_date, parse_confirmation},
    renderer::TerminalRenderer,
};

const HELP_TEXT: &str = include_str!("../assets/help.txt");

/// Line-oriented interactive session over any reader and writer.
pub struct Shell<R, W> {
    store: TaskStore,
    renderer: TerminalRenderer,
    input: R,
    output: W,
    input_closed: bool,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(store: TaskStore, renderer: TerminalRenderer, input: R, output: W) -> Self {
        Self {
            store,
            renderer,
            input,
            output,
            input_closed: false,
        }
    }

    /// Runs until `exit` or end of input.
    pub async fn run(mut self) -> Result<()> {
        write!(self.output, "{HELP_TEXT}")?;

        while !self.input_closed {
            let Some(line) = self.read_line("> ")? else {
                break;
            };

            let command = line.trim().to_lowercase();
            let outcome: Result<()> = match command.as_str() {
                "" => Ok(()),
                "exit" | "quit" => {
                    writeln!(self.output, "Goodbye.")?;
                    break;
                }
                "help" => write!(self.output, "{HELP_TEXT}").map_err(Into::into),
                "add" => self.add().await,
                "list" => self.list().await,
                "show" => self.show().await,
                "update" => self.update().await,
                "done" => self.done().await,
                "del" | "delete" => self.delete().await,
                "find" | "search" => self.find().await,
                "categories" => self.categories().await,
                "reindex" => self.reindex().await,
                other => writeln!(
                    self.output,
                    "Unknown command '{other}'. Type 'help' for the list of commands."
                )
                .map_err(Into::into),
            };

            if let Err(error) = outcome {
                writeln!(self.output, "Error: {error:#}")?;
                if let Some(hint) = error_hint(&error) {
                    writeln!(self.output, "{hint}")?;
                }
            }
        }

        self.output.flush()?;
        Ok(())
    }

    async fn add(&mut self) -> Result<()> {
        let Some(title) = self.ask_field(TaskField::Title)? else {
            return Ok(());
        };
        let Some(description) = self.ask_field(TaskField::Description)? else {
            return Ok(());
        };
        let Some(category) = self.ask_field(TaskField::Category)? else {
            return Ok(());
        };
        let Some(due_date) = self.ask_field(TaskField::DueDate)? else {
            return Ok(());
        };
        let Some(priority) = self.ask_field(TaskField::Priority)? else {
            return Ok(());
        };

        let new_task = NewTask::new(title, description, category, due_date, priority);
        let (id, index_error) = self.store.add(&new_task).await?.into_parts();
        self.report_index_error(index_error.as_ref())?;

        self.show_markdown(&CreateResult::new(new_task.into_task(id)).to_string())
    }

    async fn list(&mut self) -> Result<()> {
        let Some(choice) = self.prompt_choice("1 - all tasks, 2 - one category", 2)? else {
            return Ok(());
        };

        let tasks = if choice == 1 {
            self.store.list_tasks().await?
        } else {
            let Some(category) = self.pick_category().await? else {
                return Ok(());
            };
            self.store
                .search_tasks(&SearchFilter::new().with_category(category))
                .await?
        };

        self.show_markdown(&Tasks(tasks).to_string())
    }

    async fn show(&mut self) -> Result<()> {
        let Some(id) = self.prompt_id("Task ID")? else {
            return Ok(());
        };

        let fetched = self
            .store
            .get(&Selector::One(id))
            .await
            .with_context(|| format!("Failed to show task {id}"))?;
        self.show_markdown(&Tasks::from(fetched.into_vec()).to_string())
    }

    async fn update(&mut self) -> Result<()> {
        let Some(id) = self.prompt_id("ID of the task to update")? else {
            return Ok(());
        };
        let task = self
            .store
            .get_task(id)
            .await?
            .ok_or(TaskError::TaskNotFound { id })
            .with_context(|| format!("Failed to update task {id}"))?;

        writeln!(self.output, "Fields:")?;
        for (index, field) in TaskField::ALL.iter().enumerate() {
            writeln!(
                self.output,
                "{}. {}: {}",
                index + 1,
                field.label(),
                task.field(*field)
            )?;
        }

        let Some(choice) = self.prompt_choice("Field number", TaskField::ALL.len())? else {
            return Ok(());
        };
        let field = TaskField::ALL[choice - 1];
        let Some(value) = self.ask_field(field)? else {
            return Ok(());
        };

        let changes = TaskChanges::new().set(field, value);
        let (task, index_error) = self
            .store
            .update(id, &changes)
            .await
            .with_context(|| format!("Failed to update task {id}"))?
            .into_parts();
        self.report_index_error(index_error.as_ref())?;

        self.show_markdown(&UpdateResult::with_changes(task, changes.describe()).to_string())
    }

    async fn done(&mut self) -> Result<()> {
        let Some(id) = self.prompt_id("ID of the finished task")? else {
            return Ok(());
        };

        let (task, index_error) = self
            .store
            .mark_done(id)
            .await
            .with_context(|| format!("Failed to mark task {id} as done"))?
            .into_parts();
        self.report_index_error(index_error.as_ref())?;

        let changes = TaskChanges::mark_done().describe();
        self.show_markdown(&UpdateResult::with_changes(task, changes).to_string())
    }

    async fn delete(&mut self) -> Result<()> {
        let Some(choice) = self.prompt_choice("1 - one task by ID, 2 - a whole category", 2)?
        else {
            return Ok(());
        };

        let (ids, question) = if choice == 1 {
            let Some(id) = self.prompt_id("ID of the task to delete")? else {
                return Ok(());
            };
            (vec![id], format!("Delete task {id}? (yes/no)"))
        } else {
            let Some(category) = self.pick_category().await? else {
                return Ok(());
            };
            let ids = self
                .store
                .search(&SearchFilter::new().with_category(&category))
                .await?;
            let question = format!("Delete {} tasks in '{category}'? (yes/no)", ids.len());
            (ids, question)
        };

        match self.confirm(&question)? {
            Some(true) => {}
            Some(false) => {
                writeln!(self.output, "Deletion cancelled.")?;
                return Ok(());
            }
            None => return Ok(()),
        }

        for id in ids {
            let (title, index_error) = self
                .store
                .delete(id)
                .await
                .with_context(|| format!("Failed to delete task {id}"))?
                .into_parts();
            self.report_index_error(index_error.as_ref())?;
            self.show_markdown(&DeleteResult::new(id, title).to_string())?;
        }
        Ok(())
    }

    async fn find(&mut self) -> Result<()> {
        writeln!(self.output, "Leave a field empty to skip it.")?;
        let Some(keyword) = self.prompt_text("Keyword", true)? else {
            return Ok(());
        };
        let Some(category) = self.prompt_text("Category", true)? else {
            return Ok(());
        };
        let Some(status) = self.prompt_text("Status", true)? else {
            return Ok(());
        };

        let filter = SearchFilter::new()
            .with_keyword(keyword)
            .with_category(category)
            .with_status(status);
        if filter.normalized().is_empty() {
            writeln!(self.output, "No search parameters given.")?;
            return Ok(());
        }

        let tasks = self.store.search_tasks(&filter).await?;
        if tasks.is_empty() {
            writeln!(self.output, "No tasks match the search.")?;
            return Ok(());
        }
        self.show_markdown(&Tasks(tasks).to_string())
    }

    async fn categories(&mut self) -> Result<()> {
        let categories = self.store.categories().await?;
        self.show_markdown(&Categories(categories).to_string())
    }

    async fn reindex(&mut self) -> Result<()> {
        let written = self.store.rebuild_index().await?;
        writeln!(self.output, "Rebuilt the search index with {written} tasks.")?;
        Ok(())
    }

    /// Lists the categories and asks for one by number. Spellings that
    /// differ only in case are listed once, since the search ignores case.
    async fn pick_category(&mut self) -> Result<Option<String>> {
        let categories = Categories(distinct_ignoring_case(self.store.categories().await?));
        if categories.0.is_empty() {
            writeln!(self.output, "No categories found.")?;
            return Ok(None);
        }
        self.show_markdown(&categories.to_string())?;

        let choice = self.prompt_choice("Category number", categories.0.len())?;
        Ok(choice.map(|index| categories.0[index - 1].clone()))
    }

    /// Asks for a non-empty field value. Due dates must parse as DD.MM.YYYY.
    fn ask_field(&mut self, field: TaskField) -> Result<Option<String>> {
        if field != TaskField::DueDate {
            return self.prompt_text(field.label(), false);
        }

        loop {
            let Some(value) = self.prompt_text("Due date (DD.MM.YYYY)", false)? else {
                return Ok(None);
            };
            if is_valid_due_date(&value) {
                return Ok(Some(value));
            }
            writeln!(self.output, "The date must use the DD.MM.YYYY format.")?;
        }
    }

    fn prompt_id(&mut self, label: &str) -> Result<Option<u64>> {
        loop {
            let Some(answer) = self.prompt_text(label, false)? else {
                return Ok(None);
            };
            match answer.parse::<u64>() {
                Ok(id) => return Ok(Some(id)),
                Err(_) => writeln!(self.output, "The task ID must be a whole number.")?,
            }
        }
    }

    /// Asks for a number between 1 and `max`.
    fn prompt_choice(&mut self, label: &str, max: usize) -> Result<Option<usize>> {
        loop {
            let Some(answer) = self.prompt_text(label, false)? else {
                return Ok(None);
            };
            match answer.parse::<usize>() {
                Ok(choice) if (1..=max).contains(&choice) => return Ok(Some(choice)),
                _ => writeln!(self.output, "Choose a number from 1 to {max}.")?,
            }
        }
    }

    fn confirm(&mut self, question: &str) -> Result<Option<bool>> {
        loop {
            let Some(answer) = self.prompt_text(question, false)? else {
                return Ok(None);
            };
            match parse_confirmation(&answer) {
                Some(confirmed) => return Ok(Some(confirmed)),
                None => writeln!(self.output, "Please answer yes or no.")?,
            }
        }
    }

    /// Prompts until an acceptable answer. `None` when the user cancels or
    /// input ends.
    fn prompt_text(&mut self, label: &str, allow_empty: bool) -> Result<Option<String>> {
        loop {
            let Some(answer) = self.read_line(&format!("{label}: "))? else {
                return Ok(None);
            };
            if is_cancel(&answer) {
                writeln!(self.output, "Cancelled.")?;
                return Ok(None);
            }

            let answer = answer.trim();
            if answer.is_empty() && !allow_empty {
                writeln!(self.output, "This field cannot be empty.")?;
                continue;
            }
            return Ok(Some(answer.to_string()));
        }
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.input_closed = true;
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn report_index_error(&mut self, error: Option<&TaskError>) -> Result<()> {
        if let Some(error) = error {
            writeln!(self.output, "{}", index_warning(error))?;
        }
        Ok(())
    }

    fn show_markdown(&mut self, markdown: &str) -> Result<()> {
        self.renderer.render_to(&mut self.output, markdown)?;
        Ok(())
    }
}

/// Follow-up advice printed under an error from a store operation.
fn error_hint(error: &anyhow::Error) -> Option<&'static str> {
    let error = error.downcast_ref::<TaskError>()?;
    if error.is_not_found() {
        Some("Use 'list' to see the existing task IDs.")
    } else if error.is_validation() {
        Some("Nothing was changed. Check the value and try again.")
    } else if error.is_storage() {
        Some("Check that the database files exist and are writable.")
    } else {
        None
    }
}

/// Keeps the first spelling of each category, comparing lower-cased.
fn distinct_ignoring_case(categories: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    categories
        .into_iter()
        .filter(|category| seen.insert(category.to_lowercase()))
        .collect()
}
