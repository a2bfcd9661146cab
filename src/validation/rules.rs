//! Validation rules, accumulating every violation instead of stopping at the
//! first one.

use crate::settings::ControllerSettings;
use crate::validation::violations::{GeometryViolation, SettingsViolation};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub type GeometryCheck = Validation<(), NonEmptyVec<GeometryViolation>>;
pub type SettingsCheck = Validation<(), NonEmptyVec<SettingsViolation>>;

fn positive_length(field: &'static str, value: f64) -> GeometryCheck {
    if !value.is_finite() {
        Validation::fail(GeometryViolation::NotFinite { field, value })
    } else if value <= 0.0 {
        Validation::fail(GeometryViolation::NotPositive { field, value })
    } else {
        Validation::success(())
    }
}

fn finite_offset(field: &'static str, value: f64) -> GeometryCheck {
    if value.is_finite() {
        Validation::success(())
    } else {
        Validation::fail(GeometryViolation::NotFinite { field, value })
    }
}

/// A panel size is committed or applied only when both sides are positive
/// finite numbers.
pub fn validate_size(width: f64, height: f64) -> GeometryCheck {
    Validation::all_vec(vec![
        positive_length("width", width),
        positive_length("height", height),
    ])
    .map(|_| ())
}

pub fn validate_offset(left: f64, top: f64) -> GeometryCheck {
    Validation::all_vec(vec![finite_offset("left", left), finite_offset("top", top)]).map(|_| ())
}

pub fn validate_settings(settings: &ControllerSettings) -> SettingsCheck {
    let elements = &settings.elements;
    let mut checks: Vec<SettingsCheck> = [
        ("panel box", &elements.panel_box),
        ("selector box", &elements.selector_box),
        ("splitter", &elements.splitter),
        ("ambient container", &elements.ambient),
    ]
    .into_iter()
    .map(|(role, id)| {
        if id.trim().is_empty() {
            Validation::fail(SettingsViolation::EmptyElementId { role })
        } else {
            Validation::success(())
        }
    })
    .collect();

    if settings.resize_handle_classes.iter().all(|c| c.trim().is_empty()) {
        checks.push(Validation::fail(SettingsViolation::NoResizeHandles));
    }

    let margin = settings.ambient_margin;
    if !margin.is_finite() || margin < 0.0 {
        checks.push(Validation::fail(SettingsViolation::InvalidMargin(margin)));
    }

    let min_width = settings.docked_min_width;
    if !min_width.is_finite() || min_width < 0.0 {
        checks.push(Validation::fail(SettingsViolation::InvalidMinWidth(min_width)));
    }

    if settings.auto_close_delay_ms == 0 {
        checks.push(Validation::fail(SettingsViolation::ZeroAutoCloseDelay));
    }

    if settings.history_limit == 0 {
        checks.push(Validation::fail(SettingsViolation::ZeroHistoryLimit));
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Flatten a failed check into its violations; empty on success.
pub fn collect_violations<E: Clone>(check: &Validation<(), NonEmptyVec<E>>) -> Vec<E> {
    match check {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().cloned().collect(),
    }
}
