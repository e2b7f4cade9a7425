use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "vcs", about = "A minimal local version control system", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding repositories (overrides the config file)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new repository
    Init(RepoArgs),
    /// Stage a file for the next commit
    Add(AddArgs),
    /// Record staged files on the active branch
    Commit(CommitArgs),
    /// Create a branch from the active branch
    Branch(BranchArgs),
    /// Make a branch the active one
    #[command(alias = "switch_branch")]
    SwitchBranch(BranchArgs),
    /// Copy a repository under a new name
    Clone(CloneArgs),
    /// Show commit history
    Log(RepoArgs),
    /// Append another branch's entries onto the active branch
    Merge(BranchArgs),
    /// Compare the active branch with another branch
    Diff(BranchArgs),
    /// Exclude a path from staging
    Ignore(IgnoreArgs),
    /// List ignored paths
    #[command(alias = "view_ignore_list")]
    ViewIgnoreList(RepoArgs),
    /// Show the active branch and staged files
    Status(RepoArgs),
    /// List branches
    Branches(RepoArgs),
}

#[derive(Args, Debug)]
pub struct RepoArgs {
    pub repo: String,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    pub repo: String,
    pub file: String,
}

#[derive(Args, Debug)]
pub struct CommitArgs {
    pub repo: String,
    pub message: String,
}

#[derive(Args, Debug)]
pub struct BranchArgs {
    pub repo: String,
    pub branch: String,
}

#[derive(Args, Debug)]
pub struct CloneArgs {
    pub repo: String,
    pub new_name: String,
}

#[derive(Args, Debug)]
pub struct IgnoreArgs {
    pub repo: String,
    pub path: String,
}
