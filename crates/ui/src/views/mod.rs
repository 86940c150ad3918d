mod quiz;

pub use quiz::QuizScreen;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
