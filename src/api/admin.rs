//! Admin Endpoints

use futures::future::try_join;
use serde_json::Value;

use super::{ApiClient, Navigator};
use crate::error::ApiError;
use crate::storage::KeyValueStore;

/// Account counts shown on the admin dashboard
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DashboardStats {
    /// Donors
    pub sellers: usize,
    /// Recipients
    pub buyers: usize,
}

impl<S: KeyValueStore, N: Navigator> ApiClient<S, N> {
    pub async fn view_all_sellers(&self) -> Result<Vec<Value>, ApiError> {
        self.get_json("admin/viewallsellers").await
    }

    pub async fn view_all_buyers(&self) -> Result<Vec<Value>, ApiError> {
        self.get_json("admin/viewallbuyers").await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        let (sellers, buyers) = try_join(self.view_all_sellers(), self.view_all_buyers()).await?;
        Ok(DashboardStats { sellers: sellers.len(), buyers: buyers.len() })
    }
}
