// Theme colours and the per-series colour cascade
use crate::domain::input::Styling;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    pub background: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub palette: Vec<String>,
}

impl ThemeColors {
    pub fn subtitle_color(&self) -> Option<&str> {
        self.subtitle.as_deref().or(self.title.as_deref())
    }

    /// Series styling first, then the first palette entry, then the title colour.
    pub fn value_color(&self, styling: &Styling) -> Option<String> {
        non_empty(styling.value_color.as_deref())
            .or_else(|| non_empty(self.palette.first().map(String::as_str)))
            .or_else(|| non_empty(self.title.as_deref()))
            .map(str::to_string)
    }

    /// Series styling first, then the second palette entry, then the subtitle colour.
    pub fn label_color(&self, styling: &Styling) -> Option<String> {
        non_empty(styling.label_color.as_deref())
            .or_else(|| non_empty(self.palette.get(1).map(String::as_str)))
            .or_else(|| non_empty(self.subtitle_color()))
            .map(str::to_string)
    }
}

fn non_empty(color: Option<&str>) -> Option<&str> {
    color.filter(|c| !c.trim().is_empty())
}
