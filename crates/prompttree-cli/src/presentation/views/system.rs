use std::fmt;

use crate::presentation::view_models::{HealthViewModel, InitViewModel, MutationViewModel};

pub struct InitView<'a> {
    data: &'a InitViewModel,
}

impl<'a> InitView<'a> {
    pub fn new(data: &'a InitViewModel) -> Self {
        Self { data }
    }
}

impl<'a> fmt::Display for InitView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Config:       {}", self.data.config_path)?;
        writeln!(f, "API URL:      {}", self.data.api_url)?;
        writeln!(f, "Timeout:      {}s", self.data.timeout_secs)?;
        writeln!(f, "Note create:  {}", self.data.note_create)
    }
}

pub struct HealthView<'a> {
    data: &'a HealthViewModel,
}

impl<'a> HealthView<'a> {
    pub fn new(data: &'a HealthViewModel) -> Self {
        Self { data }
    }
}

impl<'a> fmt::Display for HealthView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.data.error {
            None => writeln!(f, "API at {} is reachable.", self.data.api_url),
            Some(error) => {
                writeln!(f, "API at {} is not reachable.", self.data.api_url)?;
                writeln!(f, "  {}", error)
            }
        }
    }
}

pub struct MutationView<'a> {
    data: &'a MutationViewModel,
}

impl<'a> MutationView<'a> {
    pub fn new(data: &'a MutationViewModel) -> Self {
        Self { data }
    }
}

impl<'a> fmt::Display for MutationView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", capitalize(&self.data.mutation), self.data.target)?;
        if let Some(count) = self.data.prompt_count {
            write!(f, " ({} prompts in tree)", count)?;
        }
        writeln!(f)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
