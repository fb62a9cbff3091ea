//! Printable collateral descriptors.
//!
//! QR encoding and PDF layout happen in an external renderer. This module
//! produces what that renderer consumes: the kind of document, its title,
//! and the absolute URL the QR code must point at.

use serde::Serialize;

use crate::invitation_flow::invitation_base_path;
use crate::plans::{Feature, Plan};

/// `/event-id/{www_id}`
pub fn microsite_path(www_id: &str) -> String {
    format!("/event-id/{www_id}")
}

/// `/event-id/{www_id}/upload`
pub fn upload_path(www_id: &str) -> String {
    format!("/event-id/{www_id}/upload")
}

/// Join a configured base URL with an absolute path, avoiding a double slash.
pub fn absolute_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollateralKind {
    InvitationCard,
    TableCard,
    PhotoUploadSign,
}

impl CollateralKind {
    pub const ALL: [CollateralKind; 3] = [
        Self::InvitationCard,
        Self::TableCard,
        Self::PhotoUploadSign,
    ];

    fn required_features(self) -> &'static [Feature] {
        match self {
            Self::InvitationCard => &[Feature::QrCodes],
            Self::TableCard => &[Feature::QrCodes, Feature::PdfCollateral],
            Self::PhotoUploadSign => &[
                Feature::QrCodes,
                Feature::PdfCollateral,
                Feature::GuestUploads,
            ],
        }
    }

    fn target_path(self, www_id: &str) -> String {
        match self {
            Self::InvitationCard => invitation_base_path(www_id),
            Self::TableCard => microsite_path(www_id),
            Self::PhotoUploadSign => upload_path(www_id),
        }
    }

    fn title(self, event_title: &str) -> String {
        match self {
            Self::InvitationCard => format!("{event_title}: You're Invited"),
            Self::TableCard => format!("{event_title}: Welcome"),
            Self::PhotoUploadSign => format!("{event_title}: Share Your Photos"),
        }
    }

    pub fn available_on(self, plan: Plan) -> bool {
        self.required_features().iter().all(|f| plan.allows(*f))
    }
}

/// Input for the external PDF/QR renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollateralDescriptor {
    pub kind: CollateralKind,
    pub title: String,
    /// Absolute URL to encode in the QR code.
    pub qr_payload: String,
}

/// Collateral the organizer's plan covers, in a fixed order.
pub fn available_collateral(
    plan: Plan,
    base_url: &str,
    www_id: &str,
    event_title: &str,
) -> Vec<CollateralDescriptor> {
    CollateralKind::ALL
        .into_iter()
        .filter(|kind| kind.available_on(plan))
        .map(|kind| CollateralDescriptor {
            kind,
            title: kind.title(event_title),
            qr_payload: absolute_url(base_url, &kind.target_path(www_id)),
        })
        .collect()
}
