//! Partner logistics schema and the transform into it.
//!
//! [`transform`] maps one [`UpstreamOrder`] onto the flat record the
//! logistics partner ingests. The mapping never fails: every optional
//! upstream value is resolved through [`present`] / [`or_default`], so an
//! order with no customer, no addresses and no line items still produces a
//! complete record.
//!
//! Four fields capture the wall-clock time of the transform rather than
//! anything in the source order: `created_at`, `orderdate`, `orderdate_utc`
//! and `ts`. Use [`transform_at`] to pin them.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::order::{Address, UpstreamOrder};
use crate::types::Timestamp;

const WEIGHT_UNIT: &str = "kg";
const DIMENSION_UNIT: &str = "cm";
const ZERO_QUANTITY: &str = "0";
const SHIPPING_TYPE: &str = "EXP";
const COD_CURRENCY: &str = "INR";

// ---------------------------------------------------------------------------
// Seller identity
// ---------------------------------------------------------------------------

/// The seller block stamped onto every forwarded order.
///
/// Fixed for one deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerIdentity {
    pub name: String,
    pub email: String,
    pub reg_id: i64,
}

impl Default for SellerIdentity {
    fn default() -> Self {
        Self {
            name: "Aurora Tech".to_string(),
            email: "contact@auroratech.in".to_string(),
            reg_id: 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Partner records
// ---------------------------------------------------------------------------

/// Quality-control stub attached to each product line. Never inspected here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QcDetails {
    pub inspected_by: String,
    pub inspection_date: String,
    pub notes: String,
    pub qc_passed: bool,
}

impl Default for QcDetails {
    fn default() -> Self {
        Self {
            inspected_by: String::new(),
            inspection_date: String::new(),
            notes: String::new(),
            qc_passed: true,
        }
    }
}

/// One product line of a [`TransformedOrder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductLine {
    /// 1-based position within the order.
    pub id: u32,
    pub product_name: String,
    pub productshortname: String,
    pub product_sku: String,
    pub product_hsn_code: String,
    pub quantity: i64,
    #[serde(rename = "unitPrice")]
    pub unit_price: f64,
    #[serde(rename = "taxRate")]
    pub tax_rate: f64,
    pub discount: f64,
    pub cod_charges: f64,
    pub cod_charges_currency: String,
    pub product_pkg_dim_breadth: f64,
    pub product_pkg_dim_height: f64,
    pub product_pkg_dim_length: f64,
    pub product_pkg_dim_unit: String,
    pub product_pkg_weight: f64,
    pub product_pkg_weight_unit: String,
    pub product_pkg_volumetric_weight: f64,
    pub product_pkg_volumetric_weight_unit: String,
    pub product_qc_details: QcDetails,
}

/// An order in the partner logistics schema.
///
/// Courier, pickup and dispatch fields are placeholders filled in by later
/// stages on the partner side; they are always `null` or `""` here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformedOrder {
    // --- billing ---
    pub billing_addressln: String,
    pub billing_addressln2: Option<String>,
    pub billing_city: String,
    pub billing_country: String,
    pub billing_country_code: String,
    pub billing_country_code_id: String,
    pub billing_customer_name: String,
    pub billing_email: String,
    pub billing_isd_code: String,
    pub billing_last_name: String,
    pub billing_phone: String,
    pub billing_pincode: String,
    pub billing_state: String,

    // --- courier ---
    pub courier_awb_data: Option<String>,
    pub courier_awb_no: Option<String>,
    pub courier_invoice_amt: Option<String>,
    pub courier_invoice_amt_currency: Option<String>,
    pub courier_invoice_no: Option<String>,
    pub courier_partner_id: Option<String>,
    pub courier_partner_name: Option<String>,
    pub courier_payment_method: Option<String>,

    pub created_at: String,

    // --- customer ---
    pub cust_addressln: String,
    pub cust_addressln2: Option<String>,
    pub cust_city: String,
    pub cust_contact_no: String,
    pub cust_country_code: String,
    pub cust_country_code_id: String,
    pub cust_customer_name: String,
    pub cust_email: String,
    pub cust_isd_code: String,
    pub cust_last_name: String,
    pub cust_pincode: String,
    pub cust_state: String,
    pub cust_useremail: String,

    pub customer_name: String,
    pub declared_value: String,
    pub declared_value_currency: String,

    // --- dispatch / order dates ---
    pub dispatch_actual_date: Option<String>,
    pub dispatch_expected_date: Option<String>,
    pub isactive: bool,
    pub orderdate: String,
    pub orderdate_formatted: Option<String>,
    pub orderdate_utc: String,
    pub out_for_delivery_actual_date: Option<String>,

    // --- pickup ---
    pub pickup_actual_date: Option<String>,
    pub pickup_addressln: String,
    pub pickup_addressln2: Option<String>,
    pub pickup_awb_no: Option<String>,
    pub pickup_city: String,
    pub pickup_country_code: Option<String>,
    pub pickup_email: String,
    pub pickup_expected_date: Option<String>,
    pub pickup_isd_code: String,
    pub pickup_last_name: String,
    pub pickup_phone: String,
    pub pickup_pincode: String,
    pub pickup_seller_name: String,
    pub pickup_state: String,
    pub pickup_status: Option<String>,
    pub pickup_status_desc: Option<String>,

    // --- package ---
    pub pkg_applicable_weight: String,
    pub pkg_applicable_weight_unit: String,
    pub pkg_dim_breadth: f64,
    pub pkg_dim_height: f64,
    pub pkg_dim_length: f64,
    pub pkg_dim_unit: String,
    pub pkg_volumetric_weight: String,
    pub pkg_volumetric_weight_unit: String,
    pub pkg_weight: String,
    pub pkg_weight_unit: String,

    pub products: Vec<ProductLine>,

    // --- seller ---
    pub seller_email: String,
    /// Upstream order id. This is the dedup key.
    pub seller_orderid: String,
    pub seller_ordernumber: String,
    pub seller_reg_id: i64,
    pub sellername: String,

    // --- shipping ---
    pub shipping_addressln: String,
    pub shipping_addressln2: Option<String>,
    pub shipping_city: String,
    pub shipping_country_code: String,
    pub shipping_country_code_id: String,
    pub shipping_customer_name: String,
    pub shipping_email: String,
    pub shipping_isd_code: String,
    pub shipping_last_name: String,
    pub shipping_phone: String,
    pub shipping_pincode: String,
    pub shipping_state: String,
    pub shipping_type: String,

    pub ts: String,
}

// ---------------------------------------------------------------------------
// Default-if-absent helpers
// ---------------------------------------------------------------------------

/// An upstream value is present only if it is set and non-empty.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// The upstream value, or `default` when it is absent.
fn or_default(value: Option<&str>, default: &str) -> String {
    present(value).unwrap_or(default).to_string()
}

/// The upstream value, or `null` when it is absent.
fn or_null(value: Option<&str>) -> Option<String> {
    present(value).map(str::to_string)
}

/// Read one field of an optional address.
fn address_field<'a>(
    address: Option<&'a Address>,
    field: impl FnOnce(&'a Address) -> &'a Option<String>,
) -> Option<&'a str> {
    address.and_then(|a| field(a).as_deref())
}

/// Parse an upstream decimal string. Absent or unparsable input yields `0`.
pub fn parse_price(amount: Option<&str>) -> f64 {
    amount
        .and_then(|a| a.trim().parse::<f64>().ok())
        .filter(|p| p.is_finite())
        .unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Transform
// ---------------------------------------------------------------------------

/// Map an upstream order into the partner schema, stamping the processed
/// timestamps with the current time.
pub fn transform(order: &UpstreamOrder, seller: &SellerIdentity) -> TransformedOrder {
    transform_at(order, seller, Utc::now())
}

/// Map an upstream order into the partner schema with an explicit
/// processing instant.
pub fn transform_at(
    order: &UpstreamOrder,
    seller: &SellerIdentity,
    processed_at: Timestamp,
) -> TransformedOrder {
    let billing = order.billing_address.as_ref();
    let shipping = order.shipping_address.as_ref();
    let customer = order.customer.as_ref();

    let display_name = customer.map(|c| c.display_name()).unwrap_or_default();
    let last_name = or_default(customer.and_then(|c| c.last_name.as_deref()), "");
    let email = or_default(customer.and_then(|c| c.email.as_deref()), "");

    let total = order.total.as_ref();
    let processed_date = processed_at.format("%Y-%m-%d").to_string();
    let processed_utc = processed_at.to_rfc3339_opts(SecondsFormat::Millis, true);

    TransformedOrder {
        billing_addressln: or_default(address_field(billing, |a| &a.address1), ""),
        billing_addressln2: or_null(address_field(billing, |a| &a.address2)),
        billing_city: or_default(address_field(billing, |a| &a.city), ""),
        billing_country: or_default(address_field(billing, |a| &a.country), ""),
        billing_country_code: String::new(),
        billing_country_code_id: String::new(),
        billing_customer_name: display_name.clone(),
        billing_email: email.clone(),
        billing_isd_code: String::new(),
        billing_last_name: last_name.clone(),
        billing_phone: or_default(address_field(billing, |a| &a.phone), ""),
        billing_pincode: or_default(address_field(billing, |a| &a.zip), ""),
        billing_state: or_default(address_field(billing, |a| &a.province), ""),

        courier_awb_data: None,
        courier_awb_no: None,
        courier_invoice_amt: None,
        courier_invoice_amt_currency: None,
        courier_invoice_no: None,
        courier_partner_id: None,
        courier_partner_name: None,
        courier_payment_method: None,

        created_at: processed_date.clone(),

        cust_addressln: or_default(address_field(shipping, |a| &a.address1), ""),
        cust_addressln2: or_null(address_field(shipping, |a| &a.address2)),
        cust_city: or_default(address_field(shipping, |a| &a.city), ""),
        cust_contact_no: or_default(address_field(shipping, |a| &a.phone), ""),
        cust_country_code: String::new(),
        cust_country_code_id: String::new(),
        cust_customer_name: display_name.clone(),
        cust_email: email.clone(),
        cust_isd_code: String::new(),
        cust_last_name: last_name.clone(),
        cust_pincode: or_default(address_field(shipping, |a| &a.zip), ""),
        cust_state: or_default(address_field(shipping, |a| &a.province), ""),
        cust_useremail: email.clone(),

        customer_name: display_name.clone(),
        declared_value: or_default(total.and_then(|m| m.amount.as_deref()), ZERO_QUANTITY),
        declared_value_currency: or_default(total.and_then(|m| m.currency_code.as_deref()), ""),

        dispatch_actual_date: None,
        dispatch_expected_date: None,
        isactive: true,
        orderdate: processed_date,
        orderdate_formatted: None,
        orderdate_utc: processed_utc.clone(),
        out_for_delivery_actual_date: None,

        pickup_actual_date: None,
        pickup_addressln: String::new(),
        pickup_addressln2: None,
        pickup_awb_no: None,
        pickup_city: String::new(),
        pickup_country_code: None,
        pickup_email: String::new(),
        pickup_expected_date: None,
        pickup_isd_code: String::new(),
        pickup_last_name: String::new(),
        pickup_phone: String::new(),
        pickup_pincode: String::new(),
        pickup_seller_name: String::new(),
        pickup_state: String::new(),
        pickup_status: None,
        pickup_status_desc: None,

        pkg_applicable_weight: ZERO_QUANTITY.to_string(),
        pkg_applicable_weight_unit: WEIGHT_UNIT.to_string(),
        pkg_dim_breadth: 0.0,
        pkg_dim_height: 0.0,
        pkg_dim_length: 0.0,
        pkg_dim_unit: DIMENSION_UNIT.to_string(),
        pkg_volumetric_weight: ZERO_QUANTITY.to_string(),
        pkg_volumetric_weight_unit: WEIGHT_UNIT.to_string(),
        pkg_weight: ZERO_QUANTITY.to_string(),
        pkg_weight_unit: WEIGHT_UNIT.to_string(),

        products: order
            .line_items
            .iter()
            .zip(1..)
            .map(|(item, id)| ProductLine {
                id,
                product_name: item.title.clone(),
                productshortname: item.title.clone(),
                product_sku: or_default(item.sku.as_deref(), ""),
                product_hsn_code: String::new(),
                quantity: item.quantity,
                unit_price: parse_price(
                    item.unit_price.as_ref().and_then(|m| m.amount.as_deref()),
                ),
                tax_rate: 0.0,
                discount: 0.0,
                cod_charges: 0.0,
                cod_charges_currency: COD_CURRENCY.to_string(),
                product_pkg_dim_breadth: 0.0,
                product_pkg_dim_height: 0.0,
                product_pkg_dim_length: 0.0,
                product_pkg_dim_unit: DIMENSION_UNIT.to_string(),
                product_pkg_weight: 0.0,
                product_pkg_weight_unit: WEIGHT_UNIT.to_string(),
                product_pkg_volumetric_weight: 0.0,
                product_pkg_volumetric_weight_unit: WEIGHT_UNIT.to_string(),
                product_qc_details: QcDetails::default(),
            })
            .collect(),

        seller_email: seller.email.clone(),
        seller_orderid: order.id.clone(),
        seller_ordernumber: order.name.clone(),
        seller_reg_id: seller.reg_id,
        sellername: seller.name.clone(),

        shipping_addressln: or_default(address_field(shipping, |a| &a.address1), ""),
        shipping_addressln2: or_null(address_field(shipping, |a| &a.address2)),
        shipping_city: or_default(address_field(shipping, |a| &a.city), ""),
        shipping_country_code: String::new(),
        shipping_country_code_id: String::new(),
        shipping_customer_name: display_name,
        shipping_email: email,
        shipping_isd_code: String::new(),
        shipping_last_name: last_name,
        shipping_phone: or_default(address_field(shipping, |a| &a.phone), ""),
        shipping_pincode: or_default(address_field(shipping, |a| &a.zip), ""),
        shipping_state: or_default(address_field(shipping, |a| &a.province), ""),
        shipping_type: SHIPPING_TYPE.to_string(),

        ts: processed_utc,
    }
}

/// Transform a fetched page of orders, preserving fetch order.
pub fn transform_all(orders: &[UpstreamOrder], seller: &SellerIdentity) -> Vec<TransformedOrder> {
    let processed_at = Utc::now();
    orders
        .iter()
        .map(|order| transform_at(order, seller, processed_at))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
