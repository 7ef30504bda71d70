//! Current market price lookup.

use rust_decimal::Decimal;

use crate::application::errors::OrderServiceError;
use crate::application::ports::AssetRepositoryPort;
use crate::domain::shared::AssetId;

/// Current price of an asset, as recorded by the asset store.
///
/// # Errors
///
/// - [`OrderServiceError::NotFound`] if the asset does not exist
/// - [`OrderServiceError::Validation`] if the asset has no usable price
/// - [`OrderServiceError::Internal`] if the lookup fails
pub async fn get_current_market_price<A>(
    asset_id: &AssetId,
    asset_repo: &A,
) -> Result<Decimal, OrderServiceError>
where
    A: AssetRepositoryPort + ?Sized,
{
    let asset = asset_repo
        .get_asset_by_id(asset_id)
        .await?
        .ok_or_else(|| OrderServiceError::not_found("Asset", asset_id.as_str()))?;

    if asset.price <= Decimal::ZERO {
        return Err(OrderServiceError::validation(format!(
            "No market price available for {asset_id}"
        )));
    }
    Ok(asset.price)
}
