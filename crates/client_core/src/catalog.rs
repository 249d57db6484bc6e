use shared::domain::ProjectId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("no selectable projects configured")]
    Empty,
    #[error("project id must not be blank")]
    BlankProject,
    #[error("project {0} is not in the configured project list")]
    UnknownProject(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCatalog {
    projects: Vec<ProjectId>,
}

impl ProjectCatalog {
    /// Trims each id and drops repeats, keeping first-seen order.
    pub fn new<I, S>(ids: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut projects: Vec<ProjectId> = Vec::new();
        for raw in ids {
            let id = raw.as_ref().trim();
            if id.is_empty() {
                return Err(CatalogError::BlankProject);
            }
            if !projects.iter().any(|known| known.as_str() == id) {
                projects.push(ProjectId::from(id));
            }
        }
        if projects.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { projects })
    }

    pub fn first(&self) -> &ProjectId {
        &self.projects[0]
    }

    pub fn contains(&self, id: &str) -> bool {
        self.projects.iter().any(|known| known.as_str() == id.trim())
    }

    pub fn resolve(&self, id: &str) -> Result<ProjectId, CatalogError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(CatalogError::BlankProject);
        }
        self.projects
            .iter()
            .find(|known| known.as_str() == id)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownProject(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProjectId> {
        self.projects.iter()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
