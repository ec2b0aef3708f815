use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fs;
use std::path::{Path, PathBuf};

use sprig_template::OutputMode;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum BuildMode {
    /// Readable output.
    Dev,
    /// Minified output.
    Release,
}

impl BuildMode {
    fn output_mode(self) -> OutputMode {
        match self {
            BuildMode::Dev => OutputMode::Readable,
            BuildMode::Release => OutputMode::Minified,
        }
    }
}

/// Compile a template file and write `ast.json`, `build.js` and (when the
/// template has style elements) `build.css.js` into `out_dir`.
pub fn build_cmd(input: &Path, out_dir: Option<&Path>, mode: BuildMode) -> Result<()> {
    let src =
        fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))?;

    let tree = sprig_template::parse_fragment(&src)?;
    let app = sprig_template::build(&tree)?;
    let program = sprig_template::generate(&app);

    let out_dir = out_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("target/sprig-gen"));
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let ast_json = serde_json::to_string_pretty(&app).context("failed to serialize AST")?;
    let ast_path = out_dir.join("ast.json");
    fs::write(&ast_path, ast_json)
        .with_context(|| format!("failed to write {}", ast_path.display()))?;

    let js_path = out_dir.join("build.js");
    fs::write(
        &js_path,
        sprig_template::format_program(&program.code, mode.output_mode()),
    )
    .with_context(|| format!("failed to write {}", js_path.display()))?;

    if !program.css.is_empty() {
        let css_path = out_dir.join("build.css.js");
        fs::write(
            &css_path,
            sprig_template::format_program(
                &sprig_template::css_program(&program.css),
                mode.output_mode(),
            ),
        )
        .with_context(|| format!("failed to write {}", css_path.display()))?;
    }

    println!("Generated: {}", js_path.display());
    Ok(())
}
