//
//  bagisto-storefront
//  api/services/categories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Category tree types and operations.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::api::common::{ApiResponse, PaginatedResponse};
use crate::api::context::RequestOptions;
use crate::api::endpoints;
use crate::api::error::ApiError;

/// A catalog category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Category id.
    pub id: u64,

    /// Display name.
    pub name: String,

    /// URL slug.
    #[serde(default)]
    pub slug: String,

    /// Description shown on the category page.
    #[serde(default)]
    pub description: Option<String>,

    /// Banner image URL.
    #[serde(default)]
    pub image_url: Option<String>,

    /// SEO title.
    #[serde(default)]
    pub meta_title: Option<String>,

    /// SEO description.
    #[serde(default)]
    pub meta_description: Option<String>,

    /// SEO keywords.
    #[serde(default)]
    pub meta_keywords: Option<String>,

    /// Sort position among siblings.
    #[serde(default)]
    pub position: i64,

    /// Whether the category is visible.
    #[serde(default)]
    pub status: bool,

    /// How the category page renders (products, description, or both).
    #[serde(default)]
    pub display_mode: String,

    /// Parent category id; `None` for roots.
    #[serde(default)]
    pub parent_id: Option<u64>,

    /// Child categories, when the endpoint includes them.
    #[serde(default)]
    pub children: Option<Vec<Category>>,

    /// Menu icon path, when configured.
    #[serde(default)]
    pub category_icon_path: Option<String>,
}

/// Filters for [`CategoriesService::list`].
#[derive(Debug, Clone, Default)]
pub struct CategoryFilters {
    /// 1-based page number.
    pub page: Option<u32>,

    /// Items per page.
    pub limit: Option<u32>,

    /// Restrict to children of one category.
    pub parent_id: Option<u64>,
}

impl CategoryFilters {
    /// Renders the set fields as query parameters.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(parent_id) = self.parent_id {
            params.push(("parent_id".to_string(), parent_id.to_string()));
        }
        params
    }
}

/// Category tree operations.
pub struct CategoriesService {
    client: Arc<ApiClient>,
}

impl CategoriesService {
    /// Creates the service over a shared client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Lists categories matching the given filters.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn list(
        &self,
        filters: CategoryFilters,
    ) -> Result<PaginatedResponse<Category>, ApiError> {
        let options = RequestOptions {
            params: filters.to_query(),
            ..Default::default()
        };
        self.client.get(endpoints::categories::LIST, options).await
    }

    /// Fetches a single category by id.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`]; `http.404` for unknown ids.
    pub async fn by_id(&self, id: u64) -> Result<Category, ApiError> {
        let response: ApiResponse<Category> = self
            .client
            .get(&endpoints::categories::detail(id), RequestOptions::default())
            .await?;
        Ok(response.data)
    }

    /// Fetches the descendants of a category, or the whole tree when no
    /// parent is given.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn descendants(&self, parent_id: Option<u64>) -> Result<Vec<Category>, ApiError> {
        let mut params = Vec::new();
        if let Some(parent_id) = parent_id {
            params.push(("parent_id".to_string(), parent_id.to_string()));
        }
        let response: ApiResponse<Vec<Category>> = self
            .client
            .get(
                endpoints::categories::DESCENDANTS,
                RequestOptions {
                    params,
                    ..Default::default()
                },
            )
            .await?;
        Ok(response.data)
    }

    /// Fetches the top-level categories (children of the root category).
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn root_categories(&self) -> Result<Vec<Category>, ApiError> {
        let page = self
            .list(CategoryFilters {
                parent_id: Some(1),
                ..Default::default()
            })
            .await?;
        Ok(page.data)
    }

    /// Fetches the full category tree.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] when the call fails.
    pub async fn tree(&self) -> Result<Vec<Category>, ApiError> {
        self.descendants(None).await
    }
}
