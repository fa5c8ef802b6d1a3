//! Readings and setpoints of a climate node.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::info;

use crate::dispatch::HandlerRegistry;
use crate::protocol::DataType;

/// Current readings and the setpoints commanded over the mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Climate {
    /// Last temperature reading.
    pub temperature: f32,
    /// Last humidity reading.
    pub humidity: f32,
    /// Commanded temperature setpoint.
    pub temperature_target: f32,
    /// Commanded humidity setpoint.
    pub humidity_target: f32,
}

impl Default for Climate {
    fn default() -> Self {
        Self {
            temperature: 21.0,
            humidity: 41.0,
            temperature_target: 0.0,
            humidity_target: 0.0,
        }
    }
}

impl Climate {
    /// Apply a setpoint command. Returns `false` for tags that are not setpoints.
    pub fn apply(&mut self, data_type: DataType, value: f32) -> bool {
        match data_type {
            DataType::TEMPERATURE_TARGET => self.temperature_target = value,
            DataType::HUMIDITY_TARGET => self.humidity_target = value,
            _ => return false,
        }
        info!(%data_type, value, "setpoint updated");
        true
    }

    /// Register the setpoint handlers writing into `shared`.
    pub fn register(shared: &Rc<RefCell<Self>>, registry: &mut HandlerRegistry) {
        for data_type in [DataType::TEMPERATURE_TARGET, DataType::HUMIDITY_TARGET] {
            let climate = Rc::clone(shared);
            registry.register(data_type, move |data_type, value| {
                climate.borrow_mut().apply(data_type, value);
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_sets_matching_target() {
        let mut climate = Climate::default();
        assert!(climate.apply(DataType::HUMIDITY_TARGET, 55.0));
        assert!((climate.humidity_target - 55.0).abs() < f32::EPSILON);
        assert!(climate.temperature_target.abs() < f32::EPSILON);
        assert!(!climate.apply(DataType::Temperature, 30.0));
    }

    #[test]
    fn register_wires_both_setpoints() {
        let shared = Rc::new(RefCell::new(Climate::default()));
        let mut registry = HandlerRegistry::new();
        Climate::register(&shared, &mut registry);

        assert_eq!(registry.len(), 2);
        let handler = registry.get_mut(DataType::TEMPERATURE_TARGET).unwrap();
        handler(DataType::TEMPERATURE_TARGET, 23.0);
        assert!((shared.borrow().temperature_target - 23.0).abs() < f32::EPSILON);
    }
}
