pub mod answer;
pub mod level;
pub mod screening;
pub mod symptom;
pub mod threshold;
