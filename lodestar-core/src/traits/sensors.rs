//! Battery and temperature sensing traits

/// Trait for battery voltage measurement
///
/// Used by the TLM builder to fill the VBATT field.
pub trait BatterySensor {
    /// Read the battery voltage in millivolts
    ///
    /// Takes `&mut self` because ADC reads typically require mutable access.
    fn read_millivolts(&mut self) -> u16;
}

/// Trait for die/ambient temperature measurement
///
/// Used by the TLM builder to fill the TEMP field.
pub trait TemperatureSensor {
    /// Read the temperature in units of 0.25 degrees Celsius
    ///
    /// For example, 24.5 C is returned as 98. The TLM builder converts this
    /// to the 8.8 fixed-point beacon format.
    fn read_quarter_celsius(&mut self) -> i16;
}
