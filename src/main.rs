mod config;
mod content;
mod error;
mod filter;
mod models;
mod tui;

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use config::Config;
use content::Library;
use filter::{FilterCriteria, ALL};
use models::{Category, Difficulty, JsonOutput, Question, Subject, Theme};

const TUI_LOG_NAME: &str = "tui.log";

#[derive(Parser)]
#[command(name = "frontend-guide")]
#[command(about = "Frontend tutorials and a searchable bank of interview questions")]
#[command(version)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List interview questions matching the filters
    Questions(FilterArgs),

    /// Show one question with its answer
    Show {
        /// Question ID
        id: i64,
    },

    /// Pick a random question, favouring frequently asked ones
    Random(FilterArgs),

    /// List the values accepted by each filter
    Options,

    /// List the subjects
    Subjects,

    /// Show a tutorial guide
    Guide {
        /// Subject name or slug, e.g. "react" or "Next.js"
        subject: String,

        /// Show the lessons of one topic
        #[arg(long, short)]
        topic: Option<String>,
    },

    /// Show library statistics
    Stats,

    /// Launch interactive terminal UI
    Tui {
        /// Colour theme: dark/light
        #[arg(long)]
        theme: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
struct FilterArgs {
    /// Case-insensitive text matched against question, answer and tags
    #[arg(long, short)]
    search: Option<String>,

    /// Category: javascript/react/nextjs/html-css or All
    #[arg(long, short, default_value = ALL)]
    category: String,

    /// Difficulty: easy/medium/hard or All
    #[arg(long, short, default_value = ALL)]
    difficulty: String,

    /// Time bucket, e.g. "5-8 minutes", or All
    #[arg(long, short, default_value = ALL)]
    time: String,
}

impl FilterArgs {
    fn criteria(&self) -> FilterCriteria {
        // Loose category and difficulty names are expanded, anything else is matched as given
        let category = Category::from_str(&self.category)
            .map(|c| c.as_str().to_string())
            .unwrap_or_else(|| self.category.clone());
        let difficulty = Difficulty::from_str(&self.difficulty)
            .map(|d| d.as_str().to_string())
            .unwrap_or_else(|| self.difficulty.clone());

        FilterCriteria::new(
            self.search.as_deref().unwrap_or_default(),
            &category,
            &difficulty,
            &self.time,
        )
    }
}

/// Where log records are written. The TUI owns the terminal, so it logs to a file.
#[derive(Debug, PartialEq, Eq)]
enum LogSink {
    Stderr,
    File(PathBuf),
}

fn log_sink(command: &Commands) -> LogSink {
    match command {
        Commands::Tui { .. } => LogSink::File(tui_log_path()),
        _ => LogSink::Stderr,
    }
}

fn tui_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("frontend-guide")
        .join(TUI_LOG_NAME)
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn init_logging(config: &Config, sink: &LogSink) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log));

    if let LogSink::File(path) = sink {
        match open_log_file(path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            // Records are dropped rather than drawn over the screen
            Err(_) => {
                builder.target(env_logger::Target::Pipe(Box::new(io::sink())));
            }
        }
    }

    builder.init();
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let sink = log_sink(&cli.command);
    init_logging(&config, &sink);
    log::debug!("logging to {:?}", sink);
    log::debug!(
        "using config {} ({:?})",
        config::config_path().display(),
        config
    );

    let library = Library::load_embedded()?;

    match cli.command {
        Commands::Questions(args) => {
            let criteria = args.criteria();
            let results = library.search(&criteria);
            let total = library.questions().len();

            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                        "criteria": criteria,
                        "total": total,
                        "questions": results
                    })))?
                );
            } else if results.is_empty() {
                println!("No questions found.");
                println!("Try adjusting your search terms or filters.");
            } else {
                println!(
                    "{:<5} {:<48} {:<11} {:<8} TIME",
                    "ID", "QUESTION", "CATEGORY", "LEVEL"
                );
                println!("{}", "-".repeat(90));
                for q in &results {
                    println!(
                        "{:<5} {:<48} {:<11} {:<8} {}",
                        q.id,
                        truncate(&q.question, 46),
                        q.category.as_str(),
                        q.difficulty.as_str(),
                        q.time_to_answer
                    );
                }
                println!();
                println!("Showing {} of {} questions", results.len(), total);
            }
        }

        Commands::Show { id } => {
            if let Some(q) = library.question(id) {
                if cli.json {
                    println!("{}", serde_json::to_string(&JsonOutput::ok(q))?);
                } else {
                    print_question(q);
                }
            } else if cli.json {
                println!(
                    "{}",
                    serde_json::to_string(&JsonOutput::<()>::err("Question not found"))?
                );
            } else {
                println!("Question not found.");
            }
        }

        Commands::Random(args) => {
            let criteria = args.criteria();
            let mut rng = rand::thread_rng();

            match library.random_question(&criteria, &mut rng) {
                Some(q) => {
                    if cli.json {
                        println!("{}", serde_json::to_string(&JsonOutput::ok(q))?);
                    } else {
                        print_question(q);
                    }
                }
                None => {
                    if cli.json {
                        println!(
                            "{}",
                            serde_json::to_string(&JsonOutput::<()>::err(
                                "No questions match the filters"
                            ))?
                        );
                    } else {
                        println!("No questions found.");
                        println!("Try adjusting your search terms or filters.");
                    }
                }
            }
        }

        Commands::Options => {
            let options = library.filter_options();
            if cli.json {
                println!("{}", serde_json::to_string(&JsonOutput::ok(&options))?);
            } else {
                println!("Categories:   {}", options.categories.join(", "));
                println!("Difficulties: {}", options.difficulties.join(", "));
                println!("Time buckets: {}", options.time_buckets.join(", "));
            }
        }

        Commands::Subjects => {
            if cli.json {
                let subjects: Vec<_> = Subject::ALL
                    .iter()
                    .map(|s| {
                        serde_json::json!({
                            "title": s.title(),
                            "slug": s.slug(),
                            "icon": s.icon()
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string(&JsonOutput::ok(subjects))?);
            } else {
                println!("{:<5} {:<18} SLUG", "", "SUBJECT");
                println!("{}", "-".repeat(40));
                for s in Subject::ALL {
                    println!("{:<5} {:<18} {}", s.icon(), s.title(), s.slug());
                }
            }
        }

        Commands::Guide { subject, topic } => {
            let guide = match library.guide(&subject) {
                Ok(guide) => guide,
                Err(e) if cli.json => {
                    println!(
                        "{}",
                        serde_json::to_string(&JsonOutput::<()>::err(e.to_string()))?
                    );
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };

            match topic {
                None => {
                    if cli.json {
                        println!("{}", serde_json::to_string(&JsonOutput::ok(guide))?);
                    } else {
                        println!("{}", guide.title);
                        println!("{}", guide.description);
                        println!();
                        for (i, t) in guide.topics.iter().enumerate() {
                            println!("{}. {}", i + 1, t.title);
                            for s in &t.subtopics {
                                println!("   - {}", s.title);
                            }
                        }
                    }
                }
                Some(title) => {
                    let topic = match library.topic(guide, &title) {
                        Ok(topic) => topic,
                        Err(e) if cli.json => {
                            println!(
                                "{}",
                                serde_json::to_string(&JsonOutput::<()>::err(e.to_string()))?
                            );
                            return Ok(());
                        }
                        Err(e) => return Err(e.into()),
                    };

                    if cli.json {
                        println!("{}", serde_json::to_string(&JsonOutput::ok(topic))?);
                    } else {
                        println!("{} / {}", guide.title, topic.title);
                        for s in &topic.subtopics {
                            println!();
                            println!("--- {} ---", s.title);
                            println!("{}", s.content);
                            if !s.example.is_empty() {
                                println!();
                                for line in s.example.lines() {
                                    println!("    {}", line);
                                }
                            }
                        }
                    }
                }
            }
        }

        Commands::Stats => {
            let stats = library.stats();
            if cli.json {
                println!("{}", serde_json::to_string(&JsonOutput::ok(&stats))?);
            } else {
                println!("Questions: {}", stats.total_questions);
                for entry in &stats.by_category {
                    println!("  {:<12} {}", entry.label, entry.count);
                }
                println!("Difficulty:");
                for entry in &stats.by_difficulty {
                    println!("  {:<12} {}", entry.label, entry.count);
                }
                println!("Guides: {}", stats.guides);
                println!("Topics: {} ({} lessons)", stats.topics, stats.subtopics);
                println!("Code examples: {}", stats.code_examples);
            }
        }

        Commands::Tui { theme } => {
            let theme = match theme {
                Some(name) => Theme::from_str(&name)
                    .ok_or_else(|| format!("Invalid theme '{}'. Use: dark/light", name))?,
                None => config.theme,
            };
            tui::run(library, theme, config.show_filters)?;
        }
    }

    Ok(())
}

fn print_question(q: &Question) {
    println!("{} {}", q.category.icon(), q.question);
    println!("ID: {}", q.id);
    println!(
        "{} | {} | {} | asked {}",
        q.difficulty.as_str(),
        q.category.as_str(),
        q.time_to_answer,
        q.frequency.as_str()
    );
    if !q.tags.is_empty() {
        println!(
            "Tags: {}",
            q.tags
                .iter()
                .map(|t| format!("#{}", t))
                .collect::<Vec<_>>()
                .join(" ")
        );
    }
    println!();
    println!("{}", q.answer);
}

/// Shortens `s` to at most `max_len` characters, ending in "..." when cut.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
