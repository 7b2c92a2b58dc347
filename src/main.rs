#![allow(dead_code)]

use crate::areas::repository::Repository;
use crate::commands::porcelain::checkout::CheckoutOutcome;
use crate::commands::porcelain::merge::MergeOutcome;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::Path;

mod areas;
mod artifacts;
mod commands;
mod errors;

#[derive(Parser)]
#[command(
    name = "minigit",
    version = "0.1.0",
    about = "A minimal content-addressed version control store",
    long_about = "A local, single-user version control store built on \
    content-addressed snapshots with parent pointers. It tracks a working \
    directory's history through an on-disk object store and a small set of \
    references."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "init", about = "Initialize a new repository")]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        path: String,
    },
    #[command(name = "commit", about = "Create a new commit from the staged files")]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show the commit history of the current branch")]
    Log {
        #[arg(
            short = 'n',
            long,
            default_value_t = 0,
            help = "Maximum number of commits to show (0 = unlimited)"
        )]
        limit: usize,
    },
    #[command(name = "status", about = "Show the working tree status")]
    Status,
    #[command(name = "branch", about = "Create a branch, or list branches when no name is given")]
    Branch {
        #[arg(index = 1, help = "Name of the branch to create")]
        name: Option<String>,
    },
    #[command(name = "checkout", about = "Switch to another branch")]
    Checkout {
        #[arg(index = 1, help = "The branch to switch to")]
        branch: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1, help = "The branch to merge in")]
        branch: String,
    },
    #[command(name = "diff", about = "Show changes between snapshots")]
    Diff {
        #[arg(
            index = 1,
            allow_hyphen_values = true,
            help = "--staged/--cached, or a commit fingerprint"
        )]
        option1: Option<String>,
        #[arg(index = 2, help = "A second commit fingerprint")]
        option2: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let root = std::env::current_dir()?;

    match &cli.command {
        Commands::Init => {
            let repository = Repository::new(root)?;
            let report = repository.init()?;
            println!(
                "Initialized empty minigit repository in {}",
                report.root.display()
            );
        }
        Commands::Add { path } => {
            let repository = Repository::open(root)?;
            let report = repository.add(Path::new(path))?;
            println!("Added '{}' to staging area.", report.path.display());
        }
        Commands::Commit { message } => {
            let repository = Repository::open(root)?;
            let report = repository.commit(message)?;
            if let Some(branch) = &report.merged_branch {
                println!("Resolved merge of branch '{}'.", branch);
            }
            println!("Committed changes with hash: {}", report.id);
        }
        Commands::Log { limit } => {
            let repository = Repository::open(root)?;
            for entry in repository.log(*limit)? {
                println!("Commit: {}", entry.id);
                if let Some(merged_from) = &entry.merged_from {
                    println!("Merge: {}", merged_from.to_short());
                }
                println!("Date: {}", entry.timestamp);
                println!("Message: {}\n", entry.message);
            }
        }
        Commands::Status => {
            let repository = Repository::open(root)?;
            let report = repository.status()?;

            println!("On branch {}", report.branch);
            if let Some(branch) = &report.merging {
                println!("You are still merging branch '{}'.", branch);
            }
            if report.staged.is_empty() {
                println!("No files staged for commit.");
            } else {
                println!("Files staged for commit:");
                for path in &report.staged {
                    println!("  {}", path.display());
                }
            }
            if !report.modified.is_empty() {
                println!("Files modified since staging:");
                for path in &report.modified {
                    println!("  {}", path.display());
                }
            }
            if !report.untracked.is_empty() {
                println!("Untracked files:");
                for path in &report.untracked {
                    println!("  {}", path.display());
                }
            }
        }
        Commands::Branch { name: Some(name) } => {
            let repository = Repository::open(root)?;
            let report = repository.branch(name)?;
            println!("Created branch '{}'.", report.name);
        }
        Commands::Branch { name: None } => {
            let repository = Repository::open(root)?;
            println!("Branches:");
            for info in repository.list_branches()? {
                let marker = if info.is_current { "*" } else { " " };
                println!("{} {}", marker, info.name);
            }
        }
        Commands::Checkout { branch } => {
            let repository = Repository::open(root)?;
            match repository.checkout(branch)? {
                CheckoutOutcome::AlreadyOn(branch) => println!("Already on '{}'", branch),
                CheckoutOutcome::Switched(branch) => {
                    println!("Switched to branch '{}'.", branch)
                }
            }
        }
        Commands::Merge { branch } => {
            let repository = Repository::open(root)?;
            match repository.merge(branch)? {
                MergeOutcome::NothingToMerge => println!("Nothing to merge."),
                MergeOutcome::AlreadyUpToDate => println!("Already up to date."),
                MergeOutcome::FastForwarded(tip) => {
                    println!("Fast-forwarded '{}' to {}.", branch, tip)
                }
                MergeOutcome::Clean(id) => {
                    println!("Merged branch '{}' with commit hash: {}", branch, id)
                }
                MergeOutcome::Conflicted { paths } => {
                    for path in &paths {
                        println!("CONFLICT (content): Merge conflict in {}", path.display());
                    }
                    println!("Automatic merge failed; fix conflicts and then commit the result.");
                }
            }
        }
        Commands::Diff { option1, option2 } => {
            let repository = Repository::open(root)?;
            let report = repository.diff(option1.as_deref(), option2.as_deref())?;
            print!("{}", report);
        }
    }

    Ok(())
}
