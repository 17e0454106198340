use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use projdash::{
    Config, DashboardView, FooterController, FooterState, ProjectStore,
    core::{
        MockBackend, ProjectDetail, ProjectDetailBackend,
        csv::DEFAULT_CSV_FILE_NAME,
        detail::{DEFAULT_ROW_PREVIEW, FIXTURE_PROJECT_NAME},
    },
};

#[derive(Parser)]
#[command(name = "projdash")]
#[command(about = "Project dashboard over the in-memory demo data")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show one page of the project list
    List {
        /// Only projects whose name contains this text (case-insensitive)
        #[arg(short, long, default_value = "")]
        keyword: String,

        /// Zero-based page to show
        #[arg(short, long, default_value_t = 0)]
        page: usize,

        /// Viewport height used to pick the page size
        #[arg(long, default_value_t = 900)]
        viewport_height: u32,
    },
    /// Add a project to the demo list and show the result
    Add {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Export matching projects as CSV
    Export {
        #[arg(short, long, default_value = "")]
        keyword: String,

        /// Output file
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CSV_FILE_NAME)]
        out: PathBuf,
    },
    /// Show the tables of a demo project
    Tables {
        /// Project name (case-insensitive)
        #[arg(long, default_value = FIXTURE_PROJECT_NAME)]
        project: String,
    },
    /// Decide whether the footer renders compact
    Footer {
        /// Viewport height in pixels
        #[arg(long)]
        height: u32,

        /// Compact threshold in pixels
        #[arg(long)]
        threshold: Option<u32>,

        #[arg(long, value_enum)]
        force: Option<Force>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Force {
    Compact,
    Expanded,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let store = ProjectStore::seeded();

    match cli.command {
        Command::List {
            keyword,
            page,
            viewport_height,
        } => {
            let mut view = DashboardView::new(store, config.page_size, viewport_height);
            view.set_keyword(keyword);
            if !view.goto_page(page) {
                anyhow::bail!("Page {page} out of range (0..{})", view.page_count());
            }
            print_page(&view);
        }
        Command::Add { name } => {
            let mut view = DashboardView::new(store, config.page_size, 900);
            if view.add_quick(&name).is_none() {
                anyhow::bail!("Project name must not be blank");
            }
            print_page(&view);
        }
        Command::Export { keyword, out } => {
            let mut view = DashboardView::new(store.clone(), config.page_size, 900);
            view.set_keyword(keyword);
            store.download_csv(view.filtered(), &out)?;
            println!("Wrote {} project(s) to {}", view.filtered().len(), out.display());
        }
        Command::Tables { project } => {
            let Some(project_id) = store
                .list()
                .iter()
                .find(|p| p.name.eq_ignore_ascii_case(project.trim()))
                .map(|p| p.id)
            else {
                anyhow::bail!("No project named {project:?}");
            };
            let backend = MockBackend::seeded(store, config.mock_latency);
            let mut detail = ProjectDetail::new(backend.clone(), project_id);
            if !detail.load().await {
                anyhow::bail!(
                    "{}",
                    detail.error().unwrap_or("Could not load the project.")
                );
            }
            if let Some(p) = detail.project() {
                println!("{} ({} tables)", p.name, p.tables);
            }
            for table in detail.tables() {
                let columns = backend.list_columns(table.table_id).await?;
                let rows = backend.list_rows(table.table_id, DEFAULT_ROW_PREVIEW).await?;
                let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
                println!("  {} [{}] {} row(s)", table.name, names.join(", "), rows.len());
            }
        }
        Command::Footer {
            height,
            threshold,
            force,
        } => {
            let state = FooterState::new();
            state.set_threshold(threshold);
            state.set_force_compact(force.map(|f| matches!(f, Force::Compact)));
            let controller = FooterController::new(state, height);
            info!(compact = controller.is_compact(), "footer decided");
            println!(
                "{}",
                if controller.is_compact() {
                    "compact"
                } else {
                    "expanded"
                }
            );
        }
    }

    Ok(())
}

fn print_page(view: &DashboardView) {
    println!(
        "Page {}/{} ({} matching)",
        view.page_index() + 1,
        view.page_count(),
        view.filtered().len()
    );
    for project in view.page() {
        println!(
            "{} {:<32} {:>3} tables  updated {}",
            if project.favorite { "*" } else { " " },
            project.name,
            project.tables,
            project.updated_on_local()
        );
    }
}
