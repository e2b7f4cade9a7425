use anyhow::Context;
use colored::Colorize;
use vcs_sdk::{EngineConfig, Repository};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    match cli.command {
        Command::Init(args) => cmd_init(config, args),
        Command::Add(args) => cmd_add(config, args),
        Command::Commit(args) => cmd_commit(config, args),
        Command::Branch(args) => cmd_branch(config, args),
        Command::SwitchBranch(args) => cmd_switch_branch(config, args),
        Command::Clone(args) => cmd_clone(config, args),
        Command::Log(args) => cmd_log(config, args),
        Command::Merge(args) => cmd_merge(config, args),
        Command::Diff(args) => cmd_diff(config, args),
        Command::Ignore(args) => cmd_ignore(config, args),
        Command::ViewIgnoreList(args) => cmd_view_ignore_list(config, args),
        Command::Status(args) => cmd_status(config, args),
        Command::Branches(args) => cmd_branches(config, args),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(root) = &cli.root {
        config.root = root.clone();
    }
    Ok(config)
}

fn cmd_init(config: EngineConfig, args: RepoArgs) -> anyhow::Result<()> {
    let repo = Repository::init(config, &args.repo)?;
    println!(
        "{} Initialized repository {} in {}",
        "✓".green().bold(),
        repo.name().bold(),
        repo.work_dir().display()
    );
    println!("  Branch: {}", repo.active_branch().yellow());
    Ok(())
}

fn cmd_add(config: EngineConfig, args: AddArgs) -> anyhow::Result<()> {
    let repo = Repository::open(config, &args.repo)?;
    let path = repo.add(&args.file)?;
    println!("  {} {}", "staged:".green(), path);
    Ok(())
}

fn cmd_commit(config: EngineConfig, args: CommitArgs) -> anyhow::Result<()> {
    let repo = Repository::open(config, &args.repo)?;
    let record = repo.commit(&args.message)?;
    println!(
        "{} Committed {} file(s) on {}",
        "✓".green().bold(),
        record.files().len(),
        repo.active_branch().yellow()
    );
    println!("  {} {}", record.formatted_date().dimmed(), record.message());
    Ok(())
}

fn cmd_branch(config: EngineConfig, args: BranchArgs) -> anyhow::Result<()> {
    let repo = Repository::open(config, &args.repo)?;
    repo.create_branch(&args.branch)?;
    println!(
        "Created branch {} from {}",
        args.branch.yellow(),
        repo.active_branch().yellow()
    );
    Ok(())
}

fn cmd_switch_branch(config: EngineConfig, args: BranchArgs) -> anyhow::Result<()> {
    let mut repo = Repository::open(config, &args.repo)?;
    repo.switch_branch(&args.branch)?;
    println!("Switched to {}", args.branch.yellow().bold());
    Ok(())
}

fn cmd_clone(config: EngineConfig, args: CloneArgs) -> anyhow::Result<()> {
    let repo = Repository::open(config, &args.repo)?;
    let copy = repo.clone_repository(&args.new_name)?;
    println!(
        "{} Cloned {} into {}",
        "✓".green().bold(),
        repo.name().bold(),
        copy.work_dir().display()
    );
    Ok(())
}

fn cmd_log(config: EngineConfig, args: RepoArgs) -> anyhow::Result<()> {
    let repo = Repository::open(config, &args.repo)?;
    let history = repo.view_commit_history()?;
    if history.is_empty() {
        println!("No commits yet.");
        return Ok(());
    }
    println!("Commit history:");
    for record in &history {
        println!(" - {}: {}", record.formatted_date().dimmed(), record.message());
        println!("   {}", record.files().join(", ").cyan());
    }
    Ok(())
}

fn cmd_merge(config: EngineConfig, args: BranchArgs) -> anyhow::Result<()> {
    let repo = Repository::open(config, &args.repo)?;
    let outcome = repo.merge(&args.branch)?;
    println!(
        "{} Merged {} into {} ({} entries)",
        "✓".green(),
        outcome.source.yellow(),
        outcome.target.yellow(),
        outcome.appended
    );
    Ok(())
}

fn cmd_diff(config: EngineConfig, args: BranchArgs) -> anyhow::Result<()> {
    let repo = Repository::open(config, &args.repo)?;
    let diff = repo.diff(&args.branch)?;
    if diff.is_empty() {
        print!("{diff}");
        return Ok(());
    }
    for line in diff.to_string().lines() {
        let styled = if line.starts_with("+++") || line.starts_with("---") {
            line.bold()
        } else if line.starts_with('+') {
            line.green()
        } else if line.starts_with('-') {
            line.red()
        } else if line.starts_with("@@") {
            line.cyan()
        } else {
            line.normal()
        };
        println!("{styled}");
    }
    Ok(())
}

fn cmd_ignore(config: EngineConfig, args: IgnoreArgs) -> anyhow::Result<()> {
    let repo = Repository::open(config, &args.repo)?;
    if repo.ignore(&args.path)? {
        println!("Ignoring {}", args.path.bold());
    } else {
        println!("{} is already ignored", args.path.bold());
    }
    Ok(())
}

fn cmd_view_ignore_list(config: EngineConfig, args: RepoArgs) -> anyhow::Result<()> {
    let repo = Repository::open(config, &args.repo)?;
    let ignored = repo.view_ignore_list()?;
    if ignored.is_empty() {
        println!("Ignore list is empty.");
        return Ok(());
    }
    println!("Ignored files:");
    for path in &ignored {
        println!("  {path}");
    }
    Ok(())
}

fn cmd_status(config: EngineConfig, args: RepoArgs) -> anyhow::Result<()> {
    let repo = Repository::open(config, &args.repo)?;
    println!("On branch {}", repo.active_branch().yellow().bold());
    let staged = repo.staged_files()?;
    if staged.is_empty() {
        println!("\nNo changes staged.");
    } else {
        println!("\nStaged for commit:");
        for path in &staged {
            println!("  {} {}", "staged:".green(), path);
        }
    }
    Ok(())
}

fn cmd_branches(config: EngineConfig, args: RepoArgs) -> anyhow::Result<()> {
    let repo = Repository::open(config, &args.repo)?;
    for name in repo.list_branches()? {
        if name == repo.active_branch() {
            println!("* {}", name.green().bold());
        } else {
            println!("  {name}");
        }
    }
    Ok(())
}
