//! The HTC handsets that understand the charging request.

/// HTC Corporation's USB vendor ID.
pub const HTC_VID: u16 = 0x0bb4;

/// A known HTC product ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    pub name: &'static str,
    pub product_id: u16,
}

impl Product {
    pub const fn new(name: &'static str, product_id: u16) -> Self {
        Product { name, product_id }
    }
}

pub const PRODUCTS: &[Product] = &[
    Product::new("HTC One M8 (MTP)", 0x0f25),
    Product::new("HTC One M8 (MTP, ADB)", 0x061a),
    Product::new("HTC One M8 (MTP, UMS)", 0x0fb5),
    Product::new("HTC One M8 (MTP, ADB, UMS)", 0x0fb4),
    Product::new("HTC generic", 0x2008),
    Product::new("HTC Windows Phone 8S", 0xf0ca),
    Product::new("HTC One M8 (Verizon)", 0x07cb),
    Product::new("HTC One M8", 0x07ca),
    Product::new("HTC One", 0x07ae),
    Product::new("HTC One M8 (Google Play)", 0x060b),
    Product::new("HTC Windows Phone 8X", 0x0ba1),
    Product::new("HTC Windows Phone 8X", 0x0ba2),
    Product::new("HTC generic", 0x0c02),
    Product::new("HTC One S", 0x0cec),
    Product::new("HTC One S", 0x0df8),
    Product::new("HTC One S", 0x0df9),
];

/// Looks up a vendor/product pair in the product table.
pub fn lookup(vendor_id: u16, product_id: u16) -> Option<&'static Product> {
    if vendor_id != HTC_VID {
        return None;
    }

    PRODUCTS.iter().find(|p| p.product_id == product_id)
}
