use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use glyphline::{Settings, load_settings, logging, pipeline};

#[derive(Parser, Debug)]
#[command(
    name = "glyphline",
    version,
    about = "Generate synthetic OCR training lines, box files and training features"
)]
struct Cli {
    /// Read extra settings from a TOML file (applied after ./glyphline.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a corpus of line images with ground truth
    Generate {
        #[command(flatten)]
        corpus: CorpusArgs,
        #[command(flatten)]
        generate: GenerateArgs,
    },
    /// Ask the engine for initial box files
    Makebox {
        #[command(flatten)]
        corpus: CorpusArgs,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Validate box files and regenerate the broken ones
    Repair {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
    /// Produce training feature files
    Build {
        #[command(flatten)]
        corpus: CorpusArgs,
        #[command(flatten)]
        engine: EngineArgs,
        #[command(flatten)]
        build: BuildArgs,
    },
    /// Generate, box and build in one go
    Run {
        #[command(flatten)]
        corpus: CorpusArgs,
        #[command(flatten)]
        generate: GenerateArgs,
        #[command(flatten)]
        engine: EngineArgs,
        #[command(flatten)]
        build: BuildArgs,
    },
}

#[derive(Args, Debug)]
struct CorpusArgs {
    /// Corpus directory
    #[arg(short = 'o', long = "corpus")]
    corpus: Option<PathBuf>,

    /// Worker threads
    #[arg(short = 'j', long = "workers")]
    workers: Option<usize>,

    /// Merge vertically stacked ink regions (dots of i and j)
    #[arg(long = "merge-stacked")]
    merge_stacked: bool,
}

impl CorpusArgs {
    fn apply(&self, settings: &mut Settings) {
        if let Some(dir) = &self.corpus {
            settings.corpus_dir = dir.clone();
        }
        if let Some(workers) = self.workers {
            settings.generator.workers = workers;
            settings.build.workers = workers;
        }
        if self.merge_stacked {
            settings.build.align.merge_stacked = true;
        }
    }
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Glyph library root
    #[arg(short = 'g', long = "glyphs")]
    glyphs: Option<PathBuf>,

    /// Word list file
    #[arg(short = 'w', long = "words")]
    words: Option<PathBuf>,

    /// Number of lines to generate
    #[arg(short = 'n', long = "count")]
    count: Option<usize>,

    /// Random seed for a reproducible corpus
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,
}

impl GenerateArgs {
    fn apply(&self, settings: &mut Settings) {
        if let Some(root) = &self.glyphs {
            settings.glyph_root = root.clone();
        }
        if let Some(words) = &self.words {
            settings.word_list = words.clone();
        }
        if let Some(count) = self.count {
            settings.generator.count = count;
        }
        if self.seed.is_some() {
            settings.generator.seed = self.seed;
        }
    }
}

#[derive(Args, Debug)]
struct EngineArgs {
    /// Engine executable
    #[arg(short = 'e', long = "engine")]
    engine: Option<PathBuf>,

    /// Engine model directory
    #[arg(long = "tessdata-dir")]
    tessdata_dir: Option<PathBuf>,

    /// Engine language or model name
    #[arg(short = 'l', long = "lang")]
    language: Option<String>,

    /// Per-call engine timeout in seconds
    #[arg(long = "timeout")]
    timeout: Option<u64>,
}

impl EngineArgs {
    fn apply(&self, settings: &mut Settings) {
        if let Some(binary) = &self.engine {
            settings.engine.binary = binary.clone();
        }
        if self.tessdata_dir.is_some() {
            settings.engine.tessdata_dir = self.tessdata_dir.clone();
        }
        if let Some(language) = &self.language {
            settings.engine.language = language.clone();
        }
        if let Some(secs) = self.timeout {
            settings.engine.timeout = Duration::from_secs(secs);
        }
    }
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Skip box file validation before building
    #[arg(long = "no-repair")]
    no_repair: bool,

    /// Trained model to stage next to the corpus output
    #[arg(long = "base-model")]
    base_model: Option<PathBuf>,
}

impl BuildArgs {
    fn apply(&self, settings: &mut Settings) {
        if self.no_repair {
            settings.build.repair = false;
        }
        if self.base_model.is_some() {
            settings.build.base_model = self.base_model.clone();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    let mut settings = load_settings(cli.config.as_deref())?;

    match &cli.command {
        Command::Generate { corpus, generate } => {
            corpus.apply(&mut settings);
            generate.apply(&mut settings);
            println!("{}", pipeline::generate(&settings)?);
        }
        Command::Makebox { corpus, engine } => {
            corpus.apply(&mut settings);
            engine.apply(&mut settings);
            println!("{}", pipeline::makebox(&settings)?);
        }
        Command::Repair { corpus } => {
            corpus.apply(&mut settings);
            println!("{}", pipeline::repair(&settings)?);
        }
        Command::Build {
            corpus,
            engine,
            build,
        } => {
            corpus.apply(&mut settings);
            engine.apply(&mut settings);
            build.apply(&mut settings);
            println!("{}", pipeline::build(&settings)?);
        }
        Command::Run {
            corpus,
            generate,
            engine,
            build,
        } => {
            corpus.apply(&mut settings);
            generate.apply(&mut settings);
            engine.apply(&mut settings);
            build.apply(&mut settings);
            println!("{}", pipeline::run(&settings)?);
        }
    }
    Ok(())
}
