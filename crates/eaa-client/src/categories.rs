//! Application categories.

use serde::{Deserialize, Serialize};

use crate::error::{EaaError, EaaResult};
use crate::http::{EaaClient, APP_CATEGORIES_URL};
use crate::types::Meta;

/// Application category row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppCategory {
    pub name: String,
    pub uuid_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct AppCategoryResponse {
    #[allow(dead_code)]
    meta: Meta,
    #[serde(rename = "objects")]
    categories: Vec<AppCategory>,
}

impl EaaClient {
    /// List application categories (GET `…/appcategories`), dropping
    /// placeholder rows.
    pub async fn list_app_categories(&self) -> EaaResult<Vec<AppCategory>> {
        let response: AppCategoryResponse = self
            .get_json(APP_CATEGORIES_URL)
            .await
            .map_err(|e| e.op(EaaError::AppCategoriesGet))?;
        Ok(response
            .categories
            .into_iter()
            .filter(|category| !category.name.is_empty() && !category.uuid_url.is_empty())
            .collect())
    }

    /// Resolve a category name to its id.
    pub async fn app_category_uuid(&self, category_name: &str) -> EaaResult<String> {
        let categories = self.list_app_categories().await?;
        categories
            .into_iter()
            .find(|category| category.name == category_name)
            .map(|category| category.uuid_url)
            .ok_or_else(|| EaaError::NameNotFound {
                entity: "app category",
                name: category_name.to_string(),
            })
    }
}
