use chrono::Utc;
use taskdeck::cli::{Args, ConfigDiscovery, DefaultsConfig, ExecutionMode, InteractiveConfig, menu};
use taskdeck::{LoggingEventHandler, TaskManager, TaskSpec};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("taskdeck=info")
        .init();

    info!("Starting taskdeck");

    let args = Args::parse();

    match args.mode() {
        ExecutionMode::Interactive(config) => run_interactive_mode(config).await,
        ExecutionMode::ShowConfig => {
            ConfigDiscovery::show_discovery_info();
            Ok(())
        }
    }
}

async fn run_interactive_mode(
    config: InteractiveConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let defaults = ConfigDiscovery::discover_config()?;

    let mut manager = TaskManager::new();
    manager.add_event_handler(Box::new(LoggingEventHandler));

    if config.verbose {
        println!(
            "Interactive mode started. Deadlines use the {} format.",
            defaults.date_format
        );
    }

    loop {
        menu::show_menu();
        let choice = menu::prompt_line("Enter your choice: ")?;

        match choice.as_str() {
            "1" => add_task(&manager, &defaults).await?,
            "2" => add_dependency(&manager).await?,
            "3" => complete_task(&manager).await?,
            "4" => show_highest_priority(&manager).await,
            "5" => sweep_overdue(&manager).await,
            "6" => list_tasks(&manager).await,
            "7" => export_json(&manager).await,
            "0" | "quit" | "exit" => break,
            "" => continue,
            _ => println!("Invalid choice. Please try again."),
        }
    }

    println!("Exiting the task management system.");
    Ok(())
}

async fn add_task(
    manager: &TaskManager,
    defaults: &DefaultsConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let title = menu::prompt_line("Enter task title: ")?;
    let description = menu::prompt_line("Enter task description: ")?;
    let deadline_input =
        menu::prompt_line(&format!("Enter task deadline ({}): ", defaults.date_format))?;
    let deadline = menu::parse_deadline(&deadline_input, &defaults.date_format);
    let priority = menu::prompt_priority(
        &format!("Enter task priority [{}]: ", defaults.default_priority),
        defaults.default_priority,
    )?;

    match manager
        .create_task(TaskSpec::new(title, description, deadline, priority))
        .await
    {
        Ok(id) => println!("Created task {}.", id),
        Err(e) => println!("Could not create task: {}", e),
    }
    Ok(())
}

async fn add_dependency(manager: &TaskManager) -> Result<(), Box<dyn std::error::Error>> {
    let task_id = menu::prompt_task_id("Enter task ID: ")?;
    let dependency_id = menu::prompt_task_id("Enter dependency ID: ")?;

    match manager.add_dependency(task_id, dependency_id).await {
        Ok(()) => println!("Task {} now depends on {}.", task_id, dependency_id),
        Err(e) => println!("Cannot add dependency: {}", e),
    }
    Ok(())
}

async fn complete_task(manager: &TaskManager) -> Result<(), Box<dyn std::error::Error>> {
    let task_id = menu::prompt_task_id("Enter task ID to complete: ")?;

    match manager.complete_task(task_id).await {
        Ok(()) => println!("Task {} completed!", task_id),
        Err(e) => println!("Cannot complete: {}", e),
    }
    Ok(())
}

async fn show_highest_priority(manager: &TaskManager) {
    match manager.highest_priority_pending().await {
        Some(id) => println!("Highest priority task: {}", id),
        None => println!("No pending tasks."),
    }
}

async fn sweep_overdue(manager: &TaskManager) {
    let overdue = manager.sweep_overdue(Utc::now()).await;

    if overdue.is_empty() {
        println!("No overdue tasks.");
        return;
    }

    for id in overdue {
        match manager.get_task(id).await {
            Ok(task) => println!("Task {} is overdue with deadline {}!", id, task.deadline),
            Err(_) => println!("Task {} is overdue!", id),
        }
    }
}

async fn list_tasks(manager: &TaskManager) {
    let mut tasks = manager.list_tasks().await;
    tasks.sort_by_key(|t| t.id);

    println!("Task List:");
    for task in &tasks {
        println!(
            "Task ID: {}, Title: {}, Deadline: {}, Priority: {}, Completed: {}",
            task.id, task.title, task.deadline, task.priority, task.completed
        );
    }

    let stats = manager.statistics().await;
    println!(
        "({} total, {} completed, {} pending)",
        stats.total_tasks, stats.completed_tasks, stats.pending_tasks
    );
}

async fn export_json(manager: &TaskManager) {
    match manager.export_to_json().await {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!("export failed: {}", e);
            println!("Export failed: {}", e);
        }
    }
}
