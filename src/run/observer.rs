use std::fmt::Display;

use super::Configuration;

/// Gets notified about the configurations that a run passes through. Observing a run has no
/// influence on its outcome.
pub trait Observer<'a> {
    /// Called once with the configuration the run starts in.
    fn begin(&mut self, _initial: &Configuration<'a>) {}
    /// Called after `token` has been read, with the configuration that was reached.
    fn step(&mut self, _token: &str, _configuration: &Configuration<'a>) {}
    /// Called at the end of the run with the configuration that decides acceptance, i.e. after
    /// the final epsilon closure.
    fn finish(&mut self, _last: &Configuration<'a>) {}
}

/// Ignores everything.
impl<'a> Observer<'a> for () {}

/// Records every configuration of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace<'a> {
    initial: Configuration<'a>,
    steps: Vec<(String, Configuration<'a>)>,
    last: Configuration<'a>,
}

impl<'a> Trace<'a> {
    /// The configuration the run started in.
    pub fn initial(&self) -> &Configuration<'a> {
        &self.initial
    }

    /// The tokens that were read, each paired with the configuration it led to.
    pub fn steps(&self) -> &[(String, Configuration<'a>)] {
        &self.steps
    }

    /// The configuration after the final epsilon closure.
    pub fn last(&self) -> &Configuration<'a> {
        &self.last
    }
}

impl<'a> Observer<'a> for Trace<'a> {
    fn begin(&mut self, initial: &Configuration<'a>) {
        self.initial = initial.clone();
    }

    fn step(&mut self, token: &str, configuration: &Configuration<'a>) {
        self.steps.push((token.to_string(), configuration.clone()));
    }

    fn finish(&mut self, last: &Configuration<'a>) {
        self.last = last.clone();
    }
}

impl Display for Trace<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.initial)?;
        for (token, configuration) in &self.steps {
            writeln!(f, "{token}")?;
            writeln!(f, "{configuration}")?;
        }
        write!(f, "{} <- after final epsilon closure", self.last)
    }
}
