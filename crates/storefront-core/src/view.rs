//! HTML fragments for the catalog grid and the cart/wishlist modal lists.
//!
//! Rendered through askama templates under `templates/`, which escape every
//! interpolated value. Every interactive control carries `data-product-id`
//! (and `data-action` inside modals) so a single delegated listener per
//! container can route it.

use askama::Template;

use crate::cart::Cart;
use crate::catalog::normalize_image_path;
use crate::error::Result;
use crate::product::{Product, ProductId};
use crate::wishlist::Wishlist;

pub const LOAD_ERROR_HTML: &str = r#"<p class="load-error" style="text-align: center; padding: 40px; color: #5c4f49;">Unable to load products. Please try again later.</p>"#;
pub const EMPTY_CATALOG_HTML: &str =
    r#"<p class="empty-message">No products available at the moment.</p>"#;
pub const EMPTY_CART_HTML: &str = r#"<p class="empty-message">Your cart is empty</p>"#;
pub const EMPTY_WISHLIST_HTML: &str = r#"<p class="empty-message">Your wishlist is empty</p>"#;

/// Card control classes, matched with `closest()` by the delegated listener.
pub const CART_BUTTON: &str = "btn-cart";
pub const WISHLIST_BUTTON: &str = "btn-wishlist";
pub const ENQUIRE_BUTTON: &str = "btn-enquire";

/// Icon and button colour of a card's wishlist toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WishlistIndicator {
    pub icon: &'static str,
    /// Empty clears the inline colour.
    pub color: &'static str,
}

impl WishlistIndicator {
    pub fn for_state(wishlisted: bool) -> Self {
        if wishlisted {
            Self {
                icon: "heart",
                color: "#ff6b6b",
            }
        } else {
            Self {
                icon: "heart-outline",
                color: "",
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardControls {
    CartAndWishlist,
    Enquire,
}

/// Display fields shared by cards and modal lines.
struct ProductView {
    id: ProductId,
    name: String,
    image: String,
    price: String,
}

impl ProductView {
    fn new(product: &Product, symbol: &str) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            image: normalize_image_path(&product.image).into_owned(),
            price: product.price.label(symbol),
        }
    }
}

struct CardView {
    id: ProductId,
    name: String,
    image: String,
    price: String,
    delay: String,
}

#[derive(Template)]
#[template(path = "catalog_grid.html")]
struct CatalogGridTemplate {
    cards: Vec<CardView>,
    enquire: bool,
}

struct CartLineView {
    id: ProductId,
    name: String,
    image: String,
    price: String,
    quantity: u32,
}

#[derive(Template)]
#[template(path = "cart_items.html")]
struct CartItemsTemplate {
    lines: Vec<CartLineView>,
}

#[derive(Template)]
#[template(path = "wishlist_items.html")]
struct WishlistItemsTemplate {
    items: Vec<ProductView>,
}

/// Catalog grid content. An empty list renders the empty placeholder.
pub fn catalog_html(products: &[Product], symbol: &str, controls: CardControls) -> Result<String> {
    if products.is_empty() {
        return Ok(EMPTY_CATALOG_HTML.to_owned());
    }
    let cards = products
        .iter()
        .enumerate()
        .map(|(index, product)| {
            let view = ProductView::new(product, symbol);
            CardView {
                id: view.id,
                name: view.name,
                image: view.image,
                price: view.price,
                delay: format!("{:.1}", (index as f64 + 1.0) * 0.1),
            }
        })
        .collect();
    let template = CatalogGridTemplate {
        cards,
        enquire: controls == CardControls::Enquire,
    };
    Ok(template.render()?)
}

/// Cart modal line list.
pub fn cart_html(cart: &Cart, symbol: &str) -> Result<String> {
    if cart.is_empty() {
        return Ok(EMPTY_CART_HTML.to_owned());
    }
    let lines = cart
        .lines()
        .iter()
        .map(|line| {
            let view = ProductView::new(&line.product, symbol);
            CartLineView {
                id: view.id,
                name: view.name,
                image: view.image,
                price: view.price,
                quantity: line.quantity,
            }
        })
        .collect();
    Ok(CartItemsTemplate { lines }.render()?)
}

/// Wishlist modal line list.
pub fn wishlist_html(wishlist: &Wishlist, symbol: &str) -> Result<String> {
    if wishlist.is_empty() {
        return Ok(EMPTY_WISHLIST_HTML.to_owned());
    }
    let items = wishlist
        .entries()
        .iter()
        .map(|p| ProductView::new(p, symbol))
        .collect();
    Ok(WishlistItemsTemplate { items }.render()?)
}
