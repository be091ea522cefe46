use std::collections::HashMap;

use chrono::Utc;
use serde_json::Map;

use super::types::{CategoryInput, ProductInput, Reorder};
use crate::auth::audit::AuditAction;
use crate::auth::role::Capability;
use crate::auth::session::Session;
use crate::document::id::{self, IdKind};
use crate::document::model::{Category, Document, Product};
use crate::document::validate::{validate_category, validate_product, validate_reorder};
use crate::error::{OperationError, ValidationError};

fn next_order(len: usize) -> i64 {
    i64::try_from(len).map_or(i64::MAX, |n| n + 1)
}

/// Rewrite `order` to each item's 1-based position in `ids`.
fn apply_order<T>(
    items: &mut [T],
    ids: &[String],
    id_of: impl Fn(&T) -> &str,
    set: impl Fn(&mut T, i64),
) {
    let positions: HashMap<&str, i64> = ids
        .iter()
        .zip(1..)
        .map(|(id, position)| (id.as_str(), position))
        .collect();
    for item in items.iter_mut() {
        if let Some(position) = positions.get(id_of(&*item)).copied() {
            set(item, position);
        }
    }
}

pub fn create_category(
    session: &Session,
    doc: &mut Document,
    input: CategoryInput,
) -> Result<Category, OperationError> {
    session.require(Capability::ManageProducts)?;
    validate_category(&input)?;
    if doc.find_category(&input.id).is_some() {
        return Err(ValidationError::DuplicateCategory(input.id).into());
    }

    let category = Category {
        id: input.id,
        icon: input.icon,
        name: input.name,
        order: next_order(doc.categories.len()),
        extra: Map::new(),
    };
    doc.categories.push(category.clone());
    session.log_action(
        doc,
        AuditAction::CreateCategory,
        format!("Category added: {}", category.name.tr),
    );
    Ok(category)
}

/// Replace icon and name. Position and unknown keys are kept.
pub fn update_category(
    session: &Session,
    doc: &mut Document,
    category_id: &str,
    input: CategoryInput,
) -> Result<Category, OperationError> {
    session.require(Capability::ManageProducts)?;
    validate_category(&input)?;
    let category = doc
        .categories
        .iter_mut()
        .find(|c| c.id == category_id)
        .ok_or_else(|| OperationError::not_found("category", category_id))?;

    category.icon = input.icon;
    category.name = input.name;
    let updated = category.clone();
    session.log_action(
        doc,
        AuditAction::UpdateCategory,
        format!("Category updated: {}", updated.name.tr),
    );
    Ok(updated)
}

/// Delete a category together with every product filed under it.
pub fn delete_category(
    session: &Session,
    doc: &mut Document,
    category_id: &str,
) -> Result<Category, OperationError> {
    session.require(Capability::ManageProducts)?;
    let index = doc
        .categories
        .iter()
        .position(|c| c.id == category_id)
        .ok_or_else(|| OperationError::not_found("category", category_id))?;

    let removed = doc.categories.remove(index);
    let before = doc.products.len();
    doc.products.retain(|p| p.category_id != category_id);
    tracing::debug!(
        category = category_id,
        products = before - doc.products.len(),
        "removed category products"
    );
    session.log_action(
        doc,
        AuditAction::DeleteCategory,
        format!("Category deleted: {}", removed.name.tr),
    );
    Ok(removed)
}

pub fn reorder_categories(
    session: &Session,
    doc: &mut Document,
    reorder: &Reorder,
) -> Result<(), OperationError> {
    session.require(Capability::ManageProducts)?;
    validate_reorder(doc.categories.iter().map(|c| c.id.as_str()), &reorder.ids)?;
    apply_order(
        &mut doc.categories,
        &reorder.ids,
        |c| c.id.as_str(),
        |c, order| c.order = order,
    );
    session.log_action(doc, AuditAction::ReorderCategories, "Category order changed");
    Ok(())
}

fn ensure_category(doc: &Document, category_id: &str) -> Result<(), ValidationError> {
    if doc.find_category(category_id).is_some() {
        Ok(())
    } else {
        Err(ValidationError::UnknownCategory(category_id.to_string()))
    }
}

pub fn create_product(
    session: &Session,
    doc: &mut Document,
    input: ProductInput,
) -> Result<Product, OperationError> {
    session.require(Capability::ManageProducts)?;
    validate_product(&input)?;
    ensure_category(doc, &input.category_id)?;

    let product = Product {
        id: id::generate(IdKind::Product, Utc::now(), |candidate| {
            doc.find_product(candidate).is_some()
        }),
        category_id: input.category_id,
        price: input.price,
        name: input.name,
        description: input.description,
        long_description: input.long_description,
        tags: input.tags,
        image: input.image,
        status: input.status,
        order: next_order(doc.products.len()),
        extra: Map::new(),
    };
    doc.products.push(product.clone());
    session.log_action(
        doc,
        AuditAction::CreateProduct,
        format!("Product added: {}", product.name.tr),
    );
    Ok(product)
}

/// Replace a product's editable fields. Id, position and unknown keys are kept.
pub fn update_product(
    session: &Session,
    doc: &mut Document,
    product_id: &str,
    input: ProductInput,
) -> Result<Product, OperationError> {
    session.require(Capability::ManageProducts)?;
    validate_product(&input)?;
    ensure_category(doc, &input.category_id)?;
    let product = doc
        .products
        .iter_mut()
        .find(|p| p.id == product_id)
        .ok_or_else(|| OperationError::not_found("product", product_id))?;

    product.category_id = input.category_id;
    product.price = input.price;
    product.name = input.name;
    product.description = input.description;
    product.long_description = input.long_description;
    product.tags = input.tags;
    product.image = input.image;
    product.status = input.status;
    let updated = product.clone();
    session.log_action(
        doc,
        AuditAction::UpdateProduct,
        format!("Product updated: {}", updated.name.tr),
    );
    Ok(updated)
}

pub fn delete_product(
    session: &Session,
    doc: &mut Document,
    product_id: &str,
) -> Result<Product, OperationError> {
    session.require(Capability::ManageProducts)?;
    let index = doc
        .products
        .iter()
        .position(|p| p.id == product_id)
        .ok_or_else(|| OperationError::not_found("product", product_id))?;

    let removed = doc.products.remove(index);
    session.log_action(
        doc,
        AuditAction::DeleteProduct,
        format!("Product deleted: {}", removed.name.tr),
    );
    Ok(removed)
}

pub fn reorder_products(
    session: &Session,
    doc: &mut Document,
    reorder: &Reorder,
) -> Result<(), OperationError> {
    session.require(Capability::ManageProducts)?;
    validate_reorder(doc.products.iter().map(|p| p.id.as_str()), &reorder.ids)?;
    apply_order(
        &mut doc.products,
        &reorder.ids,
        |p| p.id.as_str(),
        |p, order| p.order = order,
    );
    session.log_action(doc, AuditAction::ReorderProducts, "Product order changed");
    Ok(())
}
