use anyhow::{Context, Result, anyhow, bail};
use glyphline_core::ImageFormat;
use glyphline_region::ConnectivityType;
use glyphline_synth::{GeneratorOptions, GlyphLibraryOptions};
use glyphline_train::{BuildOptions, EngineConfig};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings file picked up from the working directory
pub const LOCAL_SETTINGS_FILE: &str = "glyphline.toml";

/// Documented settings file with every key at its default value
pub const DEFAULT_SETTINGS_TOML: &str = include_str!("../glyphline.toml");

/// Everything a pipeline run needs, fully resolved
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Directory of per-character glyph images
    pub glyph_root: PathBuf,
    /// Whitespace-separated words the lines are drawn from
    pub word_list: PathBuf,
    /// Where line images and their sidecar files are written
    pub corpus_dir: PathBuf,
    /// Glyph library loading
    pub glyphs: GlyphLibraryOptions,
    /// Corpus generation
    pub generator: GeneratorOptions,
    /// External OCR engine
    pub engine: EngineConfig,
    /// Box repair and training feature generation
    pub build: BuildOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            glyph_root: PathBuf::from("fonts/arial"),
            word_list: PathBuf::from("words_1000.txt"),
            corpus_dir: PathBuf::from("tesseract_train_data"),
            glyphs: GlyphLibraryOptions::default(),
            generator: GeneratorOptions::default(),
            engine: EngineConfig::default(),
            build: BuildOptions::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    paths: Option<PathSettings>,
    compose: Option<ComposeSettings>,
    augment: Option<AugmentSettings>,
    generate: Option<GenerateSettings>,
    align: Option<AlignSettings>,
    engine: Option<EngineSettings>,
    build: Option<BuildSettings>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PathSettings {
    glyphs: Option<PathBuf>,
    words: Option<PathBuf>,
    corpus: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ComposeSettings {
    line_height: Option<u32>,
    spacing: Option<u32>,
    space_width: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AugmentSettings {
    rotate_probability: Option<f64>,
    max_rotation: Option<f32>,
    scale_probability: Option<f64>,
    min_scale: Option<f32>,
    max_scale: Option<f32>,
    blur_probability: Option<f64>,
    min_blur: Option<f32>,
    max_blur: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct GenerateSettings {
    count: Option<usize>,
    min_words: Option<usize>,
    max_words: Option<usize>,
    seed: Option<u64>,
    workers: Option<usize>,
    progress_every: Option<usize>,
    image_format: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AlignSettings {
    connectivity: Option<u8>,
    merge_stacked: Option<bool>,
    preview_line_width: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EngineSettings {
    binary: Option<PathBuf>,
    args: Option<Vec<String>>,
    tessdata_dir: Option<PathBuf>,
    language: Option<String>,
    psm: Option<u32>,
    timeout_secs: Option<u64>,
    makebox_args: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct BuildSettings {
    workers: Option<usize>,
    repair: Option<bool>,
    base_model: Option<PathBuf>,
    stage_dir: Option<PathBuf>,
}

/// Load settings: defaults, then `glyphline.toml` in the working
/// directory, then `extra_path`. Later files override single keys.
pub fn load_settings(extra_path: Option<&Path>) -> Result<Settings> {
    let mut ordered_paths = vec![PathBuf::from(LOCAL_SETTINGS_FILE)];
    if let Some(extra) = extra_path {
        if !extra.exists() {
            return Err(anyhow!("settings file not found: {}", extra.display()));
        }
        ordered_paths.push(extra.to_path_buf());
    }
    load_settings_from(&ordered_paths)
}

/// Apply every existing file of `paths` over the defaults, in order.
pub fn load_settings_from(paths: &[PathBuf]) -> Result<Settings> {
    let mut settings = Settings::default();
    for path in paths {
        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read settings: {}", path.display()))?;
            settings
                .merge_toml(&content)
                .with_context(|| format!("failed to parse settings: {}", path.display()))?;
        }
    }
    Ok(settings)
}

fn parse_image_format(name: &str) -> Result<ImageFormat> {
    ImageFormat::from_extension(name)
        .ok_or_else(|| anyhow!("unsupported image format {:?} (use tif or png)", name))
}

fn parse_connectivity(n: u8) -> Result<ConnectivityType> {
    match n {
        4 => Ok(ConnectivityType::FourWay),
        8 => Ok(ConnectivityType::EightWay),
        other => bail!("connectivity must be 4 or 8, got {}", other),
    }
}

impl Settings {
    /// Override the keys present in a TOML document.
    pub fn merge_toml(&mut self, content: &str) -> Result<()> {
        let parsed: SettingsFile = toml::from_str(content)?;
        self.merge(parsed)
    }

    fn merge(&mut self, incoming: SettingsFile) -> Result<()> {
        if let Some(paths) = incoming.paths {
            if let Some(glyphs) = paths.glyphs {
                self.glyph_root = glyphs;
            }
            if let Some(words) = paths.words {
                self.word_list = words;
            }
            if let Some(corpus) = paths.corpus {
                self.corpus_dir = corpus;
            }
        }
        if let Some(compose) = incoming.compose {
            if let Some(height) = compose.line_height {
                self.glyphs.line_height = height;
                self.generator.compose.line_height = height;
            }
            if let Some(spacing) = compose.spacing {
                self.generator.compose.spacing = spacing;
            }
            if let Some(width) = compose.space_width {
                self.glyphs.space_width = width;
            }
        }
        if let Some(augment) = incoming.augment {
            let a = &mut self.generator.augment;
            a.rotate_probability = augment.rotate_probability.unwrap_or(a.rotate_probability);
            a.max_rotation = augment.max_rotation.unwrap_or(a.max_rotation);
            a.scale_probability = augment.scale_probability.unwrap_or(a.scale_probability);
            a.min_scale = augment.min_scale.unwrap_or(a.min_scale);
            a.max_scale = augment.max_scale.unwrap_or(a.max_scale);
            a.blur_probability = augment.blur_probability.unwrap_or(a.blur_probability);
            a.min_blur = augment.min_blur.unwrap_or(a.min_blur);
            a.max_blur = augment.max_blur.unwrap_or(a.max_blur);
        }
        if let Some(generate) = incoming.generate {
            let g = &mut self.generator;
            g.count = generate.count.unwrap_or(g.count);
            g.min_words = generate.min_words.unwrap_or(g.min_words);
            g.max_words = generate.max_words.unwrap_or(g.max_words);
            if generate.seed.is_some() {
                g.seed = generate.seed;
            }
            g.workers = generate.workers.unwrap_or(g.workers);
            g.progress_every = generate.progress_every.unwrap_or(g.progress_every);
            if let Some(name) = generate.image_format {
                g.image_format = parse_image_format(&name)?;
            }
        }
        if let Some(align) = incoming.align {
            let a = &mut self.build.align;
            if let Some(n) = align.connectivity {
                a.connectivity = parse_connectivity(n)?;
            }
            a.merge_stacked = align.merge_stacked.unwrap_or(a.merge_stacked);
            if let Some(width) = align.preview_line_width {
                if width == 0 {
                    bail!("preview_line_width must be positive");
                }
                a.preview_line_width = width;
            }
        }
        if let Some(engine) = incoming.engine {
            let e = &mut self.engine;
            if let Some(binary) = engine.binary {
                e.binary = binary;
            }
            if let Some(args) = engine.args {
                e.binary_args = args;
            }
            if engine.tessdata_dir.is_some() {
                e.tessdata_dir = engine.tessdata_dir;
            }
            if let Some(language) = engine.language {
                e.language = language;
            }
            e.psm = engine.psm.unwrap_or(e.psm);
            if let Some(secs) = engine.timeout_secs {
                e.timeout = Duration::from_secs(secs);
            }
            if let Some(args) = engine.makebox_args {
                e.makebox_args = args;
            }
        }
        if let Some(build) = incoming.build {
            let b = &mut self.build;
            b.workers = build.workers.unwrap_or(b.workers);
            b.repair = build.repair.unwrap_or(b.repair);
            if build.base_model.is_some() {
                b.base_model = build.base_model;
            }
            if let Some(dir) = build.stage_dir {
                b.stage_dir = dir;
            }
        }
        Ok(())
    }
}
