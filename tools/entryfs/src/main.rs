use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use entryfs::{Entry, ExistingDirectory, RealFileSystem};

#[derive(Parser, Debug)]
#[command(name = "entryfs")]
#[command(about = "Inspect and manipulate files and directories through entry handles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory relative paths are resolved against
    /// (defaults to $ENTRYFS_ROOT or the current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show whether a path is a file or a directory
    Info {
        path: PathBuf,
    },

    /// List the entries of a directory
    Ls {
        path: PathBuf,

        /// List every file below the directory instead of direct children
        #[arg(short, long)]
        recursive: bool,
    },

    /// Print the contents of a file
    Cat {
        path: PathBuf,
    },

    /// Create a directory, including missing parents
    Mkdir {
        path: PathBuf,
    },

    /// Create a new file inside a directory
    Touch {
        directory: PathBuf,

        name: String,

        /// Contents to write into the new file
        #[arg(short, long, default_value = "")]
        content: String,
    },

    /// Delete a subdirectory and everything below it
    Rm {
        directory: PathBuf,

        name: String,
    },

    /// Delete the files of a directory
    Clean {
        directory: PathBuf,

        /// Also delete subdirectories and the directory itself
        #[arg(short, long)]
        recursive: bool,
    },
}

fn root_dir(root: Option<PathBuf>) -> Result<PathBuf> {
    match root {
        Some(dir) => Ok(dir),
        None => {
            // Check environment variable first
            if let Ok(env_root) = std::env::var("ENTRYFS_ROOT") {
                Ok(PathBuf::from(env_root))
            } else {
                std::env::current_dir().context("Failed to get current directory")
            }
        }
    }
}

fn resolve(root: &Path, path: &Path) -> Result<Entry<RealFileSystem>> {
    let full = root.join(path);
    log::debug!("Resolving {}", full.display());

    entryfs::resolve(&full).with_context(|| format!("Failed to resolve {}", path.display()))
}

fn open_directory(root: &Path, path: &Path) -> Result<ExistingDirectory> {
    ExistingDirectory::open(root.join(path))
        .with_context(|| format!("Failed to open directory {}", path.display()))
}

fn info_command(root: &Path, path: &Path) -> Result<()> {
    match resolve(root, path)? {
        Entry::File(file) => println!("{}: file", file),
        Entry::Directory(directory) => {
            let state = if directory.is_empty()? { "empty" } else { "not empty" };
            println!("{}: directory ({})", directory, state);
        }
    }
    Ok(())
}

fn ls_command(root: &Path, path: &Path, recursive: bool) -> Result<()> {
    let directory = match resolve(root, path)? {
        Entry::Directory(directory) => directory,
        Entry::File(file) => {
            println!("{}", file);
            return Ok(());
        }
    };

    if recursive {
        for file in directory.all_files_recursively()? {
            println!("{}", file);
        }
    } else {
        for entry in directory.all_files()? {
            match entry {
                Entry::Directory(d) => println!("{}/", d),
                Entry::File(f) => println!("{}", f),
            }
        }
    }
    Ok(())
}

fn cat_command(root: &Path, path: &Path) -> Result<()> {
    let file = resolve(root, path)?
        .into_file()
        .with_context(|| format!("{} is a directory", path.display()))?;

    print!("{}", file.load()?);
    Ok(())
}

fn mkdir_command(root: &Path, path: &Path) -> Result<()> {
    let directory = ExistingDirectory::create(root.join(path))
        .context("Failed to create directory")?;

    println!("Created: {}", directory);
    Ok(())
}

fn touch_command(root: &Path, directory: &Path, name: &str, content: &str) -> Result<()> {
    let file = open_directory(root, directory)?.create_file(name, content)?;

    println!("Created: {}", file);
    Ok(())
}

fn rm_command(root: &Path, directory: &Path, name: &str) -> Result<()> {
    open_directory(root, directory)?.delete_directory(name)?;

    println!("Deleted: {}", directory.join(name).display());
    Ok(())
}

fn clean_command(root: &Path, directory: &Path, recursive: bool) -> Result<()> {
    let handle = open_directory(root, directory)?;

    if recursive {
        handle.delete_all_files_and_directories_recursively()?;
        println!("Deleted: {}", handle);
    } else {
        handle.delete_all_files()?;
        println!("Deleted files in: {}", handle);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let log_level = if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .target(env_logger::Target::Stderr)
        .init();

    let root = root_dir(cli.root)?;
    log::info!("Using root directory: {}", root.display());

    match cli.command {
        Commands::Info { path } => info_command(&root, &path),
        Commands::Ls { path, recursive } => ls_command(&root, &path, recursive),
        Commands::Cat { path } => cat_command(&root, &path),
        Commands::Mkdir { path } => mkdir_command(&root, &path),
        Commands::Touch { directory, name, content } => {
            touch_command(&root, &directory, &name, &content)
        }
        Commands::Rm { directory, name } => rm_command(&root, &directory, &name),
        Commands::Clean { directory, recursive } => clean_command(&root, &directory, recursive),
    }
}
