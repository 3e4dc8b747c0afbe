//! Environment overrides live in their own test binary: they mutate process state.

use std::env;

use combinatoria::config::Settings;
use combinatoria::errors::SettingsError;

#[test]
fn given_env_overrides_when_load_then_env_wins_and_invalid_values_fail() {
    // Arrange
    env::set_var("COMBINATORIA_OPERATORS__ENABLE_LOGARITHM_OPERATIONS", "false");
    env::set_var("COMBINATORIA_LIMITS__MAX_FACTORIAL_OPERAND", "12");

    // Act
    let settings = Settings::load(None).expect("load settings");

    // Assert
    assert!(!settings.operators.enable_logarithm_operations);
    assert!(settings.operators.enable_root_log_operations);
    assert_eq!(settings.limits.max_factorial_operand, 12);

    // Arrange: an override outside the representable factorial range
    env::set_var("COMBINATORIA_LIMITS__MAX_FACTORIAL_OPERAND", "500");

    // Act
    let result = Settings::load(None);

    // Assert
    assert!(matches!(result, Err(SettingsError::InvalidLimit(_))));

    env::remove_var("COMBINATORIA_OPERATORS__ENABLE_LOGARITHM_OPERATIONS");
    env::remove_var("COMBINATORIA_LIMITS__MAX_FACTORIAL_OPERAND");
}
