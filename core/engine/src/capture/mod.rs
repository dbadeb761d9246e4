mod controller;

pub use controller::CaptureController;
