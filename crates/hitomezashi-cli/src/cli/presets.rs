//! Single-block preset cloths: `square` and `triangle`.
//!
//! Both commands pick a start-state policy from `--logic`:
//! - `random`: one `--thresholds` value per axis
//! - `alternating`: one `--first-states` value per axis
//! - `explicit`: one `--modular MODULO:CUTOFF` rule per axis
//!
//! Values are given in the shape's axis order (`shapes` lists it). Every
//! flag has a default taken from a known-good pattern, so a bare `square`
//! or `triangle` renders something worth looking at.

use anyhow::{Result, bail};
use clap::{Args, ValueEnum};

use hitomezashi::block::axis_dimension;
use hitomezashi::cloth::triangle_grid;
use hitomezashi::{Axis, Cloth, GenerationPolicy, Shape, modular_sequence};

use super::common::{OutputArgs, emit};

/// Which start-state policy a preset uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Logic {
    Explicit,
    Alternating,
    Random,
}

/// Policy flags shared by both presets.
#[derive(Debug, Clone, Args)]
pub struct PolicyArgs {
    #[arg(long, value_enum, default_value_t = Logic::Random)]
    pub logic: Logic,

    /// Random thresholds in (0, 100), one per axis
    #[arg(long, value_delimiter = ',')]
    pub thresholds: Vec<f64>,

    /// Alternating first states (0 or 1), one per axis
    #[arg(long, value_delimiter = ',')]
    pub first_states: Vec<u32>,

    /// Explicit modular rules as MODULO:CUTOFF, one per axis
    #[arg(long, value_delimiter = ',', value_parser = parse_modular)]
    pub modular: Vec<(u32, u32)>,
}

/// Parse `MODULO:CUTOFF`.
fn parse_modular(s: &str) -> Result<(u32, u32), String> {
    let (modulo, cutoff) = s
        .split_once(':')
        .ok_or_else(|| format!("expected MODULO:CUTOFF, got '{}'", s))?;
    let modulo = modulo.trim().parse().map_err(|e| format!("bad modulo '{}': {}", modulo, e))?;
    let cutoff = cutoff.trim().parse().map_err(|e| format!("bad cutoff '{}': {}", cutoff, e))?;
    Ok((modulo, cutoff))
}

/// Per-shape defaults for the policy flags.
struct Defaults {
    thresholds: &'static [f64],
    first_states: &'static [u32],
    modular: &'static [(u32, u32)],
}

const SQUARE_DEFAULTS: Defaults = Defaults {
    thresholds: &[34.0, 46.0],
    first_states: &[0, 1],
    modular: &[(6, 4), (3, 0)],
};

const TRIANGLE_DEFAULTS: Defaults = Defaults {
    thresholds: &[17.0, 67.0, 50.0],
    first_states: &[0, 1, 0],
    modular: &[(6, 2), (17, 6), (19, 9)],
};

impl PolicyArgs {
    /// Build the policy for `shape`, filling unset flags from `defaults`.
    ///
    /// Fewer values than axes leave the trailing axes unset, which block
    /// construction reports by axis. More values than axes is an error here.
    fn policy(&self, shape: Shape, grid: (usize, usize), defaults: &Defaults) -> Result<GenerationPolicy> {
        let axes = shape.axes();

        fn pick<'a, T>(given: &'a [T], fallback: &'a [T]) -> &'a [T] {
            if given.is_empty() { fallback } else { given }
        }
        fn check<T>(flag: &str, values: &[T], axes: &[Axis]) -> Result<()> {
            if values.len() > axes.len() {
                bail!("--{} takes at most {} values, got {}", flag, axes.len(), values.len());
            }
            Ok(())
        }

        Ok(match self.logic {
            Logic::Random => {
                let values = pick(&self.thresholds, defaults.thresholds);
                check("thresholds", values, axes)?;
                GenerationPolicy::randomized(axes.iter().copied().zip(values.iter().copied()))
            }
            Logic::Alternating => {
                let values = pick(&self.first_states, defaults.first_states);
                check("first-states", values, axes)?;
                GenerationPolicy::alternating(axes.iter().copied().zip(values.iter().copied()))
            }
            Logic::Explicit => {
                let values = pick(&self.modular, defaults.modular);
                check("modular", values, axes)?;
                GenerationPolicy::explicit(axes.iter().zip(values).map(|(&axis, &(modulo, cutoff))| {
                    (axis, modular_sequence(axis_dimension(shape, grid, axis), modulo, cutoff))
                }))
            }
        })
    }
}

/// Arguments for the `square` command.
#[derive(Debug, Clone, Args)]
pub struct SquareArgs {
    /// Cloth name, also the frame folder name
    #[arg(long, default_value = "square")]
    pub name: String,

    #[arg(long, default_value_t = 50)]
    pub columns: usize,

    #[arg(long, default_value_t = 50)]
    pub rows: usize,

    /// Cell size in pixels
    #[arg(long, default_value_t = 20.0)]
    pub quant: f64,

    #[command(flatten)]
    pub policy: PolicyArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the `triangle` command.
#[derive(Debug, Clone, Args)]
pub struct TriangleArgs {
    /// Cloth name, also the frame folder name
    #[arg(long, default_value = "triangle")]
    pub name: String,

    /// Rows of the triangle, which is also the line count of every axis
    #[arg(long, default_value_t = 50)]
    pub rows: usize,

    /// Cell width in pixels
    #[arg(long, default_value_t = 20.0)]
    pub quant: f64,

    /// Gradient of both sloped sides
    #[arg(long, default_value_t = 0.5)]
    pub slope: f64,

    #[command(flatten)]
    pub policy: PolicyArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Execute the square command.
pub fn cmd_square(args: &SquareArgs) -> Result<()> {
    let grid = (args.columns, args.rows);
    let policy = args.policy.policy(Shape::Square, grid, &SQUARE_DEFAULTS)?;
    emit(&args.output, |rng| {
        Ok(Cloth::square(&args.name, grid, args.quant, &policy, rng)?)
    })
}

/// Execute the triangle command.
pub fn cmd_triangle(args: &TriangleArgs) -> Result<()> {
    let grid = triangle_grid(args.rows, args.slope);
    let policy = args.policy.policy(Shape::Triangle, grid, &TRIANGLE_DEFAULTS)?;
    emit(&args.output, |rng| {
        Ok(Cloth::triangle(&args.name, grid, args.quant, args.slope, &policy, rng)?)
    })
}

/// Execute the shapes command.
pub fn cmd_shapes() {
    println!("Available shapes:");
    for shape in Shape::all() {
        let axes: Vec<String> = shape.axes().iter().map(|a| a.to_string()).collect();
        println!("  {:<10} axes: {}", shape.name(), axes.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(logic: Logic) -> PolicyArgs {
        PolicyArgs { logic, thresholds: vec![], first_states: vec![], modular: vec![] }
    }

    #[test]
    fn parses_modular_rules() {
        assert_eq!(parse_modular("6:4"), Ok((6, 4)));
        assert_eq!(parse_modular(" 17 : 6 "), Ok((17, 6)));
        assert!(parse_modular("6").is_err());
        assert!(parse_modular("a:1").is_err());
    }

    #[test]
    fn defaults_cover_every_axis() {
        for logic in [Logic::Random, Logic::Alternating, Logic::Explicit] {
            let square = args(logic).policy(Shape::Square, (5, 5), &SQUARE_DEFAULTS).unwrap();
            let triangle = args(logic).policy(Shape::Triangle, (5, 5), &TRIANGLE_DEFAULTS).unwrap();
            assert_eq!(square.name(), triangle.name());
        }
    }

    #[test]
    fn explicit_uses_modular_rules_in_axis_order() {
        let mut a = args(Logic::Explicit);
        a.modular = vec![(2, 0), (3, 0)];
        let policy = a.policy(Shape::Square, (4, 6), &SQUARE_DEFAULTS).unwrap();
        let GenerationPolicy::Explicit { sequences } = policy else {
            panic!("expected explicit policy");
        };
        assert_eq!(sequences[&Axis::Column], vec![1, 0, 1, 0]);
        assert_eq!(sequences[&Axis::Row], vec![1, 1, 0, 1, 1, 0]);
    }

    #[test]
    fn too_many_values_is_an_error() {
        let mut a = args(Logic::Random);
        a.thresholds = vec![10.0, 20.0, 30.0];
        assert!(a.policy(Shape::Square, (4, 4), &SQUARE_DEFAULTS).is_err());
    }

    #[test]
    fn too_few_values_leave_an_axis_unset() {
        let mut a = args(Logic::Random);
        a.thresholds = vec![10.0];
        let GenerationPolicy::Randomized { thresholds } =
            a.policy(Shape::Square, (4, 4), &SQUARE_DEFAULTS).unwrap()
        else {
            panic!("expected randomized policy");
        };
        assert_eq!(thresholds.len(), 1);
        assert!(thresholds.contains_key(&Axis::Column));
    }
}
