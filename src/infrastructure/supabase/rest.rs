use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::AppError;
use crate::infrastructure::supabase::client::{error_for_status, SupabaseClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

impl Order {
    fn suffix(self) -> &'static str {
        match self {
            Order::Ascending => "asc",
            Order::Descending => "desc",
        }
    }
}

/// Incrementally built `select * from {table}` against PostgREST, with
/// optional multi-column ordering and an optional equality filter.
pub struct SelectQuery<'a> {
    client: &'a SupabaseClient,
    table: &'a str,
    order: Vec<String>,
    eq: Option<(&'a str, String)>,
}

impl<'a> SelectQuery<'a> {
    pub(crate) fn new(client: &'a SupabaseClient, table: &'a str) -> Self {
        SelectQuery {
            client,
            table,
            order: Vec::new(),
            eq: None,
        }
    }

    pub fn order(mut self, column: &str, direction: Order) -> Self {
        self.order.push(format!("{}.{}", column, direction.suffix()));
        self
    }

    pub fn eq(mut self, column: &'a str, value: impl ToString) -> Self {
        self.eq = Some((column, value.to_string()));
        self
    }

    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, AppError> {
        let mut url = self.client.endpoint(&format!("rest/v1/{}", self.table))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("select", "*");
            if !self.order.is_empty() {
                pairs.append_pair("order", &self.order.join(","));
            }
            if let Some((column, value)) = &self.eq {
                pairs.append_pair(column, &format!("eq.{value}"));
            }
        }

        let request = self.client.keyed(self.client.http().get(url));
        let response = request.send().await?;
        let response = error_for_status(response, "select").await?;

        Ok(response.json().await?)
    }
}

impl SupabaseClient {
    /// Inserts one row. Nothing of the created row is consumed, so the
    /// backend is asked for a minimal reply.
    pub async fn insert_row<T: Serialize>(&self, table: &str, row: &T) -> Result<(), AppError> {
        let url = self.endpoint(&format!("rest/v1/{table}"))?;

        let response = self
            .keyed(self.http().post(url))
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await?;

        error_for_status(response, "insert").await?;
        Ok(())
    }

    /// Updates the fields of the row matched by `id`.
    pub async fn update_row<T: Serialize>(
        &self,
        table: &str,
        id: i64,
        fields: &T,
    ) -> Result<(), AppError> {
        let mut url = self.endpoint(&format!("rest/v1/{table}"))?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));

        let response = self
            .keyed(self.http().patch(url))
            .header("Prefer", "return=minimal")
            .json(fields)
            .send()
            .await?;

        error_for_status(response, "update").await?;
        Ok(())
    }

    /// Deletes the row matched by `id`.
    pub async fn delete_row(&self, table: &str, id: i64) -> Result<(), AppError> {
        let mut url = self.endpoint(&format!("rest/v1/{table}"))?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));

        let response = self.keyed(self.http().delete(url)).send().await?;

        error_for_status(response, "delete").await?;
        Ok(())
    }
}
