//! Logical locations within the dashboard.

use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

/// A screen of the dashboard, addressable by path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Projects,
    NewProject,
    ProjectDetails(u64),
    EditProject(u64),
    Tasks,
    Help,
}

impl Route {
    /// Entries shown in the navigation bar, in order.
    pub const NAV: [Route; 4] = [Route::Home, Route::Projects, Route::Tasks, Route::Help];

    /// Navigation bar label.
    pub fn label(self) -> &'static str {
        match self {
            Route::Home => "Dashboard",
            Route::Projects => "Projects",
            Route::NewProject => "New Project",
            Route::ProjectDetails(_) => "Project Details",
            Route::EditProject(_) => "Edit Project",
            Route::Tasks => "Task Board",
            Route::Help => "Help Center",
        }
    }

    /// Navigation bar entry this route sits under.
    pub fn section(self) -> Route {
        match self {
            Route::NewProject | Route::ProjectDetails(_) | Route::EditProject(_) => Route::Projects,
            other => other,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("/"),
            Route::Projects => f.write_str("/projects"),
            Route::NewProject => f.write_str("/projects/new"),
            Route::ProjectDetails(id) => write!(f, "/projects/{id}"),
            Route::EditProject(id) => write!(f, "/projects/{id}/edit"),
            Route::Tasks => f.write_str("/tasks"),
            Route::Help => f.write_str("/help"),
        }
    }
}

impl FromStr for Route {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim().to_lowercase();
        let segments: Vec<&str> = path.split('/').filter(|seg| !seg.is_empty()).collect();
        let unknown = || DashboardError::UnknownRoute(s.to_string());

        match segments.as_slice() {
            [] => Ok(Route::Home),
            ["projects"] => Ok(Route::Projects),
            ["projects", "new"] => Ok(Route::NewProject),
            ["projects", id] => id.parse().map(Route::ProjectDetails).map_err(|_| unknown()),
            ["projects", id, "edit"] => id.parse().map(Route::EditProject).map_err(|_| unknown()),
            ["tasks"] => Ok(Route::Tasks),
            ["help"] => Ok(Route::Help),
            _ => Err(unknown()),
        }
    }
}
