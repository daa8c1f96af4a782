//! Shared "overlay pipeline" logic used by the CLI, the TUI and batch mode.
//!
//! request flags/JSON -> parsed inputs -> validated overlay
//!
//! The front-ends then only deal with presentation (printing, files, widgets).

use log::{debug, info};

use crate::cli::InputArgs;
use crate::error::{AppError, EXIT_INPUT};
use crate::io::{CurveRequest, NumberInput, read_request_json};
use crate::overlay::{CurveInputs, DEFAULT_GRID_POINTS, Overlay, compute_overlay};

pub const ENV_ORDER: &str = "ZTH_ORDER";
pub const ENV_N_GRID: &str = "ZTH_N_GRID";

/// Values used when a request omits `order` or `n_grid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunDefaults {
    pub order: i64,
    pub n_grid: usize,
}

impl Default for RunDefaults {
    fn default() -> Self {
        Self {
            order: 1,
            n_grid: DEFAULT_GRID_POINTS,
        }
    }
}

impl RunDefaults {
    /// Read `ZTH_ORDER` / `ZTH_N_GRID` (a `.env` file is honoured).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut defaults = Self::default();
        if let Some(raw) = lookup(ENV_ORDER) {
            defaults.order = raw
                .trim()
                .parse()
                .map_err(|_| AppError::new(EXIT_INPUT, format!("{ENV_ORDER} must be an integer (got '{raw}').")))?;
        }
        if let Some(raw) = lookup(ENV_N_GRID) {
            defaults.n_grid = raw.trim().parse().map_err(|_| {
                AppError::new(EXIT_INPUT, format!("{ENV_N_GRID} must be a non-negative integer (got '{raw}')."))
            })?;
        }
        Ok(defaults)
    }

    /// Override with explicit CLI values.
    pub fn with_overrides(self, order: Option<i64>, n_grid: Option<usize>) -> Self {
        Self {
            order: order.unwrap_or(self.order),
            n_grid: n_grid.unwrap_or(self.n_grid),
        }
    }
}

/// Merge `--request` JSON with the per-field flags (flags win).
pub fn build_request(args: &InputArgs) -> Result<CurveRequest, AppError> {
    let mut request = match &args.request {
        Some(path) => {
            debug!("reading request {}", path.display());
            read_request_json(path)?
        }
        None => CurveRequest::default(),
    };

    let fields = [
        (&args.tp, &mut request.tp),
        (&args.zth, &mut request.zth),
        (&args.foster_r, &mut request.foster_r),
        (&args.foster_c, &mut request.foster_c),
        (&args.cauer_r, &mut request.cauer_r),
        (&args.cauer_c, &mut request.cauer_c),
    ];
    for (flag, slot) in fields {
        if let Some(raw) = flag {
            *slot = NumberInput::Text(raw.clone());
        }
    }

    Ok(request)
}

/// Resolve the CLI inputs into parsed, not yet validated, curve inputs.
pub fn resolve_inputs(args: &InputArgs, defaults: RunDefaults) -> Result<CurveInputs, AppError> {
    let request = build_request(args)?;
    // Explicit flags beat the request file, which beats the environment.
    let mut inputs = request.to_inputs(defaults.order, defaults.n_grid)?;
    if let Some(order) = args.order {
        inputs.order = order;
    }
    if let Some(n_grid) = args.n_grid {
        inputs.n_grid = n_grid;
    }
    Ok(inputs)
}

/// Execute the full overlay pipeline for one set of CLI inputs.
pub fn run_overlay(args: &InputArgs, defaults: RunDefaults) -> Result<Overlay, AppError> {
    let inputs = resolve_inputs(args, defaults)?;
    overlay_from_inputs(&inputs)
}

pub fn overlay_from_inputs(inputs: &CurveInputs) -> Result<Overlay, AppError> {
    let overlay = compute_overlay(inputs)?;
    info!(
        "overlay ready: {} measured points, {} grid points, order {}",
        overlay.bundle.tp_actual.len(),
        overlay.bundle.tp_grid.len(),
        overlay.order
    );
    Ok(overlay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EXIT_INPUT;

    fn args() -> InputArgs {
        InputArgs {
            tp: Some("0.001, 0.01, 0.1, 1, 10".to_string()),
            zth: Some("0.05, 0.15, 0.25, 0.32, 0.35".to_string()),
            foster_r: Some("0.1;0.2".to_string()),
            foster_c: Some("0.01;1.0".to_string()),
            cauer_r: Some("0.1,0.2".to_string()),
            cauer_c: Some("0.01,1.0".to_string()),
            ..InputArgs::default()
        }
    }

    #[test]
    fn env_lookup_overrides_builtin_defaults() {
        let d = RunDefaults::from_lookup(|key| match key {
            ENV_ORDER => Some("3".to_string()),
            ENV_N_GRID => Some(" 50 ".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(d, RunDefaults { order: 3, n_grid: 50 });

        let d = RunDefaults::from_lookup(|_| None).unwrap();
        assert_eq!(d, RunDefaults::default());
    }

    #[test]
    fn bad_env_value_is_an_input_error() {
        let err = RunDefaults::from_lookup(|key| (key == ENV_N_GRID).then(|| "-4".to_string())).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert!(err.message().contains(ENV_N_GRID));
    }

    #[test]
    fn flags_beat_defaults() {
        let mut a = args();
        a.order = Some(2);
        let inputs = resolve_inputs(&a, RunDefaults { order: 1, n_grid: 30 }).unwrap();
        assert_eq!(inputs.order, 2);
        assert_eq!(inputs.n_grid, 30);
        assert_eq!(inputs.tp_actual.len(), 5);
    }

    #[test]
    fn pipeline_produces_overlay() {
        let mut a = args();
        a.order = Some(2);
        a.n_grid = Some(40);
        let overlay = run_overlay(&a, RunDefaults::default()).unwrap();
        assert_eq!(overlay.order, 2);
        assert_eq!(overlay.bundle.tp_grid.len(), 40);
        assert_eq!(overlay.bundle.zth_cauer.len(), 40);
    }

    #[test]
    fn validation_errors_map_to_input_exit_code() {
        let mut a = args();
        a.zth = Some("0.1,0.2".to_string());
        let err = run_overlay(&a, RunDefaults::default()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert!(err.message().contains("same length"));
    }

    #[test]
    fn missing_field_is_reported_by_name() {
        let mut a = args();
        a.cauer_c = None;
        let err = run_overlay(&a, RunDefaults::default()).unwrap_err();
        assert!(err.message().starts_with("cauer_c"), "{}", err.message());
    }
}
