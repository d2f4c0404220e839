//! GraphQL type definitions.

use async_graphql::{EmptyMutation, EmptySubscription, Schema};

use crate::schema::ItemsQuery;

/// The items schema served by the binary.
pub type PagewiseSchema = Schema<ItemsQuery, EmptyMutation, EmptySubscription>;
