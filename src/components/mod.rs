pub mod alerts;
pub mod balance;
pub mod copy;
pub mod inputs;
pub mod misc;
pub mod modal;
pub mod svg;
pub mod word_phrase;
