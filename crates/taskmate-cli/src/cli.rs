//! One-shot subcommands.
//!
//! Each subcommand has a clap argument struct that converts into the core
//! request type (`NewTask`, `Selector`, `TaskChanges`, `SearchFilter`), and a
//! handler on [`Cli`] that runs it against the store and renders the result.

use anyhow::{bail, Context, Result};
use clap::Args;
use log::debug;
use taskmate_core::{
    Categories, CreateResult, DeleteResult, NewTask, OperationStatus, SearchFilter, Selector,
    TaskChanges, TaskError, TaskField, TaskStore, Tasks, UpdateResult,
};

use crate::{
    args::Commands,
    input::{is_valid_due_date, parse_assignment, parse_due_date},
    renderer::TerminalRenderer,
    seed::sample_tasks,
};

/// Add a new task
#[derive(Args)]
pub struct AddTaskArgs {
    /// Title of the task
    pub title: String,
    #[arg(short, long, help = "What needs to be done")]
    pub description: String,
    #[arg(short, long, help = "Free-form category, e.g. Work or Home")]
    pub category: String,
    #[arg(long, value_parser = parse_due_date, help = "Due date as DD.MM.YYYY")]
    pub due: String,
    #[arg(short, long, help = "Free-form priority, e.g. high, medium or low")]
    pub priority: String,
}

impl From<AddTaskArgs> for NewTask {
    fn from(val: AddTaskArgs) -> Self {
        NewTask::new(val.title, val.description, val.category, val.due, val.priority)
    }
}

/// List tasks
#[derive(Args)]
pub struct ListTasksArgs {
    #[arg(long, value_delimiter = ',', help = "Only these task IDs, comma-separated")]
    pub ids: Vec<u64>,
    #[arg(long, help = "Print the tasks as JSON")]
    pub json: bool,
}

impl From<&ListTasksArgs> for Selector {
    fn from(val: &ListTasksArgs) -> Self {
        if val.ids.is_empty() {
            Selector::All
        } else {
            Selector::Many(val.ids.clone())
        }
    }
}

/// Show a single task
#[derive(Args)]
pub struct ShowTaskArgs {
    #[arg(help = "ID of the task to show")]
    pub id: u64,
}

impl From<ShowTaskArgs> for Selector {
    fn from(val: ShowTaskArgs) -> Self {
        Selector::One(val.id)
    }
}

/// Change fields of a task
#[derive(Args)]
pub struct UpdateTaskArgs {
    #[arg(help = "ID of the task to update")]
    pub id: u64,
    #[arg(
        long = "set",
        value_name = "FIELD=VALUE",
        value_parser = parse_assignment,
        required = true,
        help = "Field to change: title, description, category, due_date, priority or status"
    )]
    pub assignments: Vec<(String, String)>,
}

impl TryFrom<&UpdateTaskArgs> for TaskChanges {
    type Error = TaskError;

    fn try_from(val: &UpdateTaskArgs) -> Result<Self, Self::Error> {
        TaskChanges::parse(
            val.assignments
                .iter()
                .map(|(field, value)| (field.as_str(), value.as_str())),
        )
    }
}

/// Mark a task as done
#[derive(Args)]
pub struct DoneTaskArgs {
    #[arg(help = "ID of the task to mark as done")]
    pub id: u64,
}

/// Delete a task or a whole category
#[derive(Args)]
pub struct DeleteTaskArgs {
    #[arg(
        required_unless_present = "category",
        conflicts_with = "category",
        help = "ID of the task to delete"
    )]
    pub id: Option<u64>,
    #[arg(long, help = "Delete every task in this category instead")]
    pub category: Option<String>,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

/// Search tasks
#[derive(Args)]
pub struct SearchTasksArgs {
    #[arg(
        short,
        long,
        help = "Text to look for in title, description, category or status"
    )]
    pub keyword: Option<String>,
    #[arg(short, long, help = "Exact category, any case")]
    pub category: Option<String>,
    #[arg(short, long, help = "Exact status, any case")]
    pub status: Option<String>,
}

impl From<SearchTasksArgs> for SearchFilter {
    fn from(val: SearchTasksArgs) -> Self {
        SearchFilter {
            keyword: val.keyword,
            category: val.category,
            status: val.status,
        }
    }
}

/// Rebuild the search index
#[derive(Args)]
pub struct ReindexArgs {
    #[arg(long, help = "Only report tasks whose index entry is out of date")]
    pub check: bool,
}

/// Delete every task
#[derive(Args)]
pub struct ClearArgs {
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

/// Message shown when a write reached the task database but not the index.
pub fn index_warning(error: &TaskError) -> String {
    format!("Warning: {error}. Run `tm reindex` to repair the search index.")
}

/// Runs one-shot subcommands against a store.
pub struct Cli {
    store: TaskStore,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(store: TaskStore, renderer: TerminalRenderer) -> Self {
        Self { store, renderer }
    }

    /// Dispatches a subcommand. The interactive shell is started by `main`.
    pub async fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Add(args) => self.add_task(args).await,
            Commands::List(args) => self.list_tasks(&args).await,
            Commands::Show(args) => self.show_task(args).await,
            Commands::Update(args) => self.update_task(&args).await,
            Commands::Done(args) => self.done_task(args.id).await,
            Commands::Delete(args) => self.delete_tasks(args).await,
            Commands::Search(args) => self.search_tasks(args).await,
            Commands::Categories => self.list_categories().await,
            Commands::Reindex(args) => self.reindex(args.check).await,
            Commands::Clear(args) => self.clear(args.confirm).await,
            Commands::Seed => self.seed().await,
            Commands::Shell => bail!("The interactive shell is not a one-shot command"),
        }
    }

    async fn add_task(&self, args: AddTaskArgs) -> Result<()> {
        let new_task = NewTask::from(args);
        let (id, index_error) = self
            .store
            .add(&new_task)
            .await
            .context("Failed to add task")?
            .into_parts();
        self.report_index_error(index_error.as_ref());

        self.render(&CreateResult::new(new_task.into_task(id)).to_string())
    }

    async fn list_tasks(&self, args: &ListTasksArgs) -> Result<()> {
        let tasks = Tasks::from(self.store.get(&args.into()).await?.into_vec());

        if args.json {
            println!("{}", tasks.to_json()?);
            return Ok(());
        }
        self.render(&tasks.to_string())
    }

    async fn show_task(&self, args: ShowTaskArgs) -> Result<()> {
        let id = args.id;
        let fetched = self
            .store
            .get(&args.into())
            .await
            .with_context(|| format!("Failed to show task {id}"))?;
        self.render(&Tasks::from(fetched.into_vec()).to_string())
    }

    async fn update_task(&self, args: &UpdateTaskArgs) -> Result<()> {
        let changes = TaskChanges::try_from(args)?;
        if let Some(due) = changes.get(TaskField::DueDate) {
            if !is_valid_due_date(due) {
                bail!("'{due}' is not a valid date, expected DD.MM.YYYY");
            }
        }

        let (task, index_error) = self
            .store
            .update(args.id, &changes)
            .await
            .with_context(|| format!("Failed to update task {}", args.id))?
            .into_parts();
        self.report_index_error(index_error.as_ref());

        self.render(&UpdateResult::with_changes(task, changes.describe()).to_string())
    }

    async fn done_task(&self, id: u64) -> Result<()> {
        let (task, index_error) = self
            .store
            .mark_done(id)
            .await
            .with_context(|| format!("Failed to mark task {id} as done"))?
            .into_parts();
        self.report_index_error(index_error.as_ref());

        let changes = TaskChanges::mark_done().describe();
        self.render(&UpdateResult::with_changes(task, changes).to_string())
    }

    async fn delete_tasks(&self, args: DeleteTaskArgs) -> Result<()> {
        if !args.confirm {
            self.render(
                &OperationStatus::failure("Deletion requires --confirm. Nothing was deleted.")
                    .to_string(),
            )?;
            bail!("Deletion not confirmed");
        }

        let ids = match (args.id, args.category) {
            (Some(id), _) => vec![id],
            (None, Some(category)) => {
                let ids = self
                    .store
                    .search(&SearchFilter::new().with_category(&category))
                    .await?;
                if ids.is_empty() {
                    return self.render(
                        &OperationStatus::failure(format!("No tasks in category '{category}'"))
                            .to_string(),
                    );
                }
                ids
            }
            (None, None) => bail!("Give a task ID or --category"),
        };

        for id in ids {
            let (title, index_error) = self
                .store
                .delete(id)
                .await
                .with_context(|| format!("Failed to delete task {id}"))?
                .into_parts();
            self.report_index_error(index_error.as_ref());
            self.render(&DeleteResult::new(id, title).to_string())?;
        }
        Ok(())
    }

    async fn search_tasks(&self, args: SearchTasksArgs) -> Result<()> {
        let filter = SearchFilter::from(args);
        debug!("Searching with {filter:?}");

        let tasks = self.store.search_tasks(&filter).await?;
        self.render(&Tasks(tasks).to_string())
    }

    async fn list_categories(&self) -> Result<()> {
        let categories = self.store.categories().await?;
        self.render(&Categories(categories).to_string())
    }

    async fn reindex(&self, check_only: bool) -> Result<()> {
        if check_only {
            let drifted = self.store.index_drift().await?;
            let status = if drifted.is_empty() {
                OperationStatus::success("Search index is in sync")
            } else {
                let ids: Vec<String> = drifted.iter().map(u64::to_string).collect();
                OperationStatus::failure(format!(
                    "Search index is out of date for task IDs: {}",
                    ids.join(", ")
                ))
            };
            return self.render(&status.to_string());
        }

        let written = self
            .store
            .rebuild_index()
            .await
            .context("Failed to rebuild search index")?;
        self.render(
            &OperationStatus::success(format!("Rebuilt search index with {written} tasks"))
                .to_string(),
        )
    }

    async fn clear(&self, confirmed: bool) -> Result<()> {
        if !confirmed {
            self.render(
                &OperationStatus::failure("Clearing requires --confirm. Nothing was deleted.")
                    .to_string(),
            )?;
            bail!("Clear not confirmed");
        }

        let (removed, index_error) = self.store.clear().await?.into_parts();
        self.report_index_error(index_error.as_ref());
        self.render(&OperationStatus::success(format!("Deleted {removed} tasks")).to_string())
    }

    async fn seed(&self) -> Result<()> {
        let tasks = sample_tasks();
        for task in &tasks {
            let (_, index_error) = self.store.add(task).await?.into_parts();
            self.report_index_error(index_error.as_ref());
        }
        self.render(
            &OperationStatus::success(format!("Added {} sample tasks", tasks.len())).to_string(),
        )
    }

    fn report_index_error(&self, error: Option<&TaskError>) {
        if let Some(error) = error {
            eprintln!("{}", index_warning(error));
        }
    }

    fn render(&self, markdown: &str) -> Result<()> {
        self.renderer
            .render(markdown)
            .context("Failed to write output")
    }
}
