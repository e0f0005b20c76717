use rand::Rng;

use super::Attribute;

/// Chooses which attribute a scan credits
pub trait AttributePicker: Send + Sync {
    fn pick(&self) -> Attribute;

    fn picker_name(&self) -> &'static str;
}

/// Uniform pick over the three attributes using the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomAttributePicker;

impl RandomAttributePicker {
    pub fn new() -> Self {
        Self
    }
}

impl AttributePicker for RandomAttributePicker {
    fn pick(&self) -> Attribute {
        let index = rand::rng().random_range(0..Attribute::ALL.len());
        Attribute::ALL[index]
    }

    fn picker_name(&self) -> &'static str {
        "RandomAttributePicker"
    }
}

/// Always picks the same attribute
#[derive(Debug, Clone, Copy)]
pub struct FixedAttributePicker {
    attribute: Attribute,
}

impl FixedAttributePicker {
    pub fn new(attribute: Attribute) -> Self {
        Self { attribute }
    }
}

impl AttributePicker for FixedAttributePicker {
    fn pick(&self) -> Attribute {
        self.attribute
    }

    fn picker_name(&self) -> &'static str {
        "FixedAttributePicker"
    }
}
