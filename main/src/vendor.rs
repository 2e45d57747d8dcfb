use crate::mac::MacAddress;
use mac_oui::Oui;
use mockall::automock;
use std::sync::OnceLock;

/// Classifies a hardware address by the vendor owning its OUI prefix.
#[automock]
pub trait VendorLookup {
    fn vendor(&self, mac: &MacAddress) -> Option<String>;
}

static OUI_DB: OnceLock<Option<Oui>> = OnceLock::new();

/// Retrieves or initializes the bundled OUI database.
///
/// Loaded at most once per process. A database that fails to load disables vendor
/// classification instead of failing discovery.
fn get_oui_db() -> Option<&'static Oui> {
    OUI_DB
        .get_or_init(|| match Oui::default() {
            Ok(db) => Some(db),
            Err(e) => {
                log::warn!("Failed to load OUI database, disabling vendor lookup: {}", e);
                None
            }
        })
        .as_ref()
}

pub struct OuiVendorLookup;

impl VendorLookup for OuiVendorLookup {
    fn vendor(&self, mac: &MacAddress) -> Option<String> {
        let db = get_oui_db()?;
        match db.lookup_by_mac(&mac.to_string()) {
            Ok(Some(entry)) => Some(entry.company_name.clone()),
            Ok(None) => None,
            Err(e) => {
                log::debug!("Vendor lookup of {} failed: {}", mac, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn broadcast_address_has_no_vendor() {
        let mac = MacAddress::new([0xFF; 6]);
        assert_eq!(OuiVendorLookup.vendor(&mac), None);
    }
}
