//! YAML recipe system for multi-block cloths.
//!
//! A recipe names a cloth and lists its blocks. Each block carries its
//! geometry inline, a start-state policy, and optionally some modular rules
//! and filled cells.
//!
//! ## Example Recipe
//!
//! ```yaml
//! name: "First Pattern"
//! background: { r: 255, g: 255, b: 255 }
//! blocks:
//!   - name: A
//!     cell_size: [20, 20]
//!     grid: [50, 50]
//!     policy:
//!       logic: random
//!       thresholds: { column: 34, row: 46 }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use hitomezashi::{
    Axis, BlockConfig, Cloth, Color, GenerationPolicy, LatticeBlock, Offsets, RandomSource,
    modular_sequence,
};

use super::common::{OutputArgs, emit};

/// A complete cloth recipe.
///
/// Unknown top-level keys are rejected. Block entries can't be checked the
/// same way because their geometry is flattened in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Recipe {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Margins around the stitched area.
    #[serde(default)]
    pub offsets: Offsets,
    #[serde(default = "default_background")]
    pub background: Color,
    pub blocks: Vec<BlockRecipe>,
}

fn default_background() -> Color {
    Color::WHITE
}

/// One block of a recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRecipe {
    #[serde(flatten)]
    pub config: BlockConfig,
    /// Start-state policy. Omitted means explicit, with every sequence
    /// coming from `modular`.
    #[serde(default)]
    pub policy: Option<GenerationPolicy>,
    /// Per-axis modular rules; only valid with an explicit policy.
    #[serde(default)]
    pub modular: BTreeMap<Axis, ModularRule>,
    #[serde(default)]
    pub fills: Vec<CellFill>,
}

/// `k mod modulo > cutoff` for the k-th line (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModularRule {
    pub modulo: u32,
    pub cutoff: u32,
}

/// A cell painted before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CellFill {
    pub col: usize,
    pub row: usize,
    pub color: Color,
}

impl BlockRecipe {
    /// The policy with any modular rules expanded into explicit sequences.
    pub fn resolved_policy(&self) -> Result<GenerationPolicy> {
        let policy = self
            .policy
            .clone()
            .unwrap_or_else(|| GenerationPolicy::Explicit { sequences: BTreeMap::new() });
        if self.modular.is_empty() {
            return Ok(policy);
        }

        let kind = policy.name();
        let GenerationPolicy::Explicit { mut sequences } = policy else {
            bail!(
                "block '{}': modular rules need an explicit policy, not {}",
                self.config.name,
                kind
            );
        };
        for (&axis, rule) in &self.modular {
            let len = hitomezashi::block::axis_dimension(self.config.shape, self.config.grid, axis);
            sequences.insert(axis, modular_sequence(len, rule.modulo, rule.cutoff));
        }
        Ok(GenerationPolicy::Explicit { sequences })
    }

    /// Build the block, drawing start states from `rng`.
    pub fn build<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<LatticeBlock> {
        let policy = self.resolved_policy()?;
        let mut block = LatticeBlock::new(self.config.clone(), &policy, rng)
            .with_context(|| format!("Invalid block '{}'", self.config.name))?;
        for fill in &self.fills {
            block
                .set_fill(fill.col, fill.row, fill.color)
                .with_context(|| format!("Invalid fill in block '{}'", self.config.name))?;
        }
        Ok(block)
    }
}

impl Recipe {
    /// Load a recipe from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read recipe file {}", path.display()))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse recipe YAML")
    }

    /// Build the cloth. Blocks draw from `rng` in recipe order.
    pub fn build<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Cloth> {
        if self.blocks.is_empty() {
            bail!("Recipe '{}' has no blocks", self.name);
        }

        let mut cloth = Cloth::new(&self.name)
            .with_offsets(self.offsets)
            .with_background(self.background);
        for block in &self.blocks {
            cloth.add_block(block.build(rng)?)?;
        }
        debug!(cloth = %self.name, blocks = cloth.blocks().len(), "built cloth");
        Ok(cloth)
    }
}

/// Arguments for the `render` command.
#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Recipe YAML file
    pub recipe: std::path::PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Execute the render command.
pub fn cmd_render(args: &RenderArgs) -> Result<()> {
    info!(recipe = %args.recipe.display(), "loading recipe");
    let recipe = Recipe::load(&args.recipe)?;
    info!(name = %recipe.name, blocks = recipe.blocks.len(), "loaded recipe");

    emit(&args.output, |rng| recipe.build(rng))
}

/// Execute the example command.
pub fn cmd_example() {
    print!("{}", EXAMPLE);
}

/// A two-block recipe: a modular square and a randomized triangle beside it.
pub const EXAMPLE: &str = r##"# Example hitomezashi recipe
name: "First Pattern"
description: "Modular square beside a randomized triangle"

background: { r: 255, g: 255, b: 255 }
offsets:
  width: 40
  height: 40

blocks:
  - name: square
    cell_size: [20, 20]
    grid: [30, 30]
    line_color: { r: 0, g: 0, b: 255 }
    modular:
      column: { modulo: 6, cutoff: 4 }
      row: { modulo: 3, cutoff: 0 }
    fills:
      - { col: 0, row: 0, color: { r: 250, g: 200, b: 60 } }

  - name: triangle
    shape: triangle
    origin: { x: 620, y: 0 }
    cell_size: [20, 17.89]
    grid: [30, 27]
    slope: [0.5, 0.5]
    line_color: { r: 0, g: 0, b: 255 }
    policy:
      logic: random
      thresholds: { base: 17, left: 67, right: 50 }
"##;
