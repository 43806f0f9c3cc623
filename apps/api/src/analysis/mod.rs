// Free-form prompt analysis: the prompt goes to the model, the reply comes back untouched.

pub mod analyzer;
pub mod handlers;
