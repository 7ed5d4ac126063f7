use std::{
    collections::BTreeMap,
    env,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use atlasmith::{AssetName, AtlasBuilder, Image, Origin, PixelSink};
use fs_err as fs;
use walkdir::WalkDir;

use crate::{
    data::{Config, ConfigError, Manifest},
    options::PackOptions,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackOutcome {
    Built,
    UpToDate,
}

pub fn pack(options: PackOptions) -> anyhow::Result<()> {
    let path = match options.path {
        Some(path) => path,
        None => env::current_dir()?,
    };

    let outcome = pack_project(&path, options.force).map_err(|err| {
        let missing_config = err
            .downcast_ref::<ConfigError>()
            .map_or(false, ConfigError::is_not_found);

        if missing_config {
            err.context(format!("No atlasmith.toml found at {}", path.display()))
        } else {
            err
        }
    })?;

    match outcome {
        PackOutcome::Built => log::info!("Atlas written."),
        PackOutcome::UpToDate => log::info!("Atlas is up to date, nothing to do."),
    }

    Ok(())
}

pub fn pack_project(path: &Path, force: bool) -> anyhow::Result<PackOutcome> {
    let config = Config::read_from_folder_or_file(path)?;
    let options = config.build_options();
    let image_path = config.output_image_path();
    let manifest_path = config.output_manifest_path();

    log::debug!("Packing atlas {} ({})", config.name, config.file_path.display());

    let inputs = discover_inputs(&config)?;
    let mut contents = Vec::with_capacity(inputs.len());
    let mut hashes = BTreeMap::new();

    for (name, input_path) in &inputs {
        let data = fs::read(input_path)?;
        hashes.insert(name.clone(), blake3::hash(&data).to_hex().to_string());
        contents.push((name.clone(), data));
    }

    if !force && image_path.is_file() {
        if let Some(manifest) = Manifest::read_from_file(&manifest_path)? {
            if manifest.is_up_to_date(&hashes, &options) {
                return Ok(PackOutcome::UpToDate);
            }
        }
    }

    log::info!(
        "Packing {} images into a {}x{} atlas",
        contents.len(),
        options.side(),
        options.side()
    );

    let atlas = AtlasBuilder::new(options)
        .build(contents)
        .with_context(|| format!("Failed to pack atlas {}", config.name))?;

    for name in atlas.dropped() {
        log::warn!("{} didn't fit into the atlas and was left out", name);
    }

    let mut sink = PngFileSink { path: image_path };
    atlas.upload(&mut sink)?;

    let manifest = Manifest::from_atlas(
        &atlas,
        config.output_image.clone(),
        options.pixels_per_unit,
        &hashes,
    );

    if let Some(parent) = manifest_path.parent() {
        fs::create_dir_all(parent)?;
    }
    manifest.write_to_file(&manifest_path)?;

    Ok(PackOutcome::Built)
}

/// Finds every file matched by the config's input globs, keyed by its name
/// relative to the config folder. The outputs of a previous pack are never
/// treated as inputs.
fn discover_inputs(config: &Config) -> anyhow::Result<BTreeMap<AssetName, PathBuf>> {
    let folder = config.folder();
    let outputs = [config.output_image_path(), config.output_manifest_path()];
    let mut inputs = BTreeMap::new();

    for input in &config.inputs {
        let matcher = input.matcher()?;
        let mut matched = 0;

        for entry in WalkDir::new(folder) {
            let entry = entry?;
            let path = entry.path();

            if !entry.file_type().is_file() || outputs.iter().any(|output| output == path) {
                continue;
            }

            let relative = match path.strip_prefix(folder) {
                Ok(relative) => relative,
                Err(_) => continue,
            };

            if !matcher.is_match(relative) {
                continue;
            }

            if let Some(name) = AssetName::from_paths(folder, path) {
                log::trace!("Found input {}", name);
                inputs.insert(name, path.to_owned());
                matched += 1;
            }
        }

        if matched == 0 {
            log::warn!("Input glob '{}' didn't match any files", input.glob);
        }
    }

    Ok(inputs)
}

/// Writes an uploaded atlas out as a PNG file. Rows are always stored
/// top-down, so atlases with a bottom-left origin are flipped on the way out.
struct PngFileSink {
    path: PathBuf,
}

impl PixelSink for PngFileSink {
    type Handle = PathBuf;
    type Error = anyhow::Error;

    fn upload(
        &mut self,
        width: u32,
        height: u32,
        origin: Origin,
        pixels: &[u8],
    ) -> anyhow::Result<PathBuf> {
        let mut image = Image::new_rgba8((width, height), pixels);
        if origin.flips_rows() {
            image.flip_vertical();
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = BufWriter::new(fs::File::create(&self.path)?);
        image.encode_png(&mut file)?;
        file.flush()?;

        log::trace!("Saved atlas image to {}", self.path.display());

        Ok(self.path.clone())
    }
}
