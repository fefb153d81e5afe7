//! FedRAMP control mapping.
//!
//! The table is static: four controls with fixed support declarations and
//! evidence text. The only per-scan value is the status echoed on the
//! malware-protection control.

use crate::core::{ScanResult, ScanStatus};

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

/// How well a control is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Support {
    /// Fully supported. Serialized as `true`.
    Yes,
    /// Not supported. Serialized as `false`.
    No,
    /// Partially supported. Serialized as `"Partial"`.
    Partial,
}

impl Serialize for Support {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Yes => serializer.serialize_bool(true),
            Self::No => serializer.serialize_bool(false),
            Self::Partial => serializer.serialize_str("Partial"),
        }
    }
}

impl fmt::Display for Support {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => f.write_str("True"),
            Self::No => f.write_str("False"),
            Self::Partial => f.write_str("Partial"),
        }
    }
}

/// Static declaration of one control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    /// Control identifier, e.g. `SI-3`.
    pub id: &'static str,
    /// Control name.
    pub name: &'static str,
    /// Support level.
    pub supported: Support,
    /// Evidence text.
    pub evidence: &'static str,
    /// Whether this control carries the scan status.
    pub echoes_result: bool,
}

/// The mapped controls, in report order.
pub const FEDRAMP_CONTROLS: [Control; 4] = [
    Control {
        id: "SI-3",
        name: "Malicious Code Protection",
        supported: Support::Yes,
        evidence: "ClamAV on-demand malware scan",
        echoes_result: true,
    },
    Control {
        id: "AU-2",
        name: "Audit Events",
        supported: Support::Yes,
        evidence: "Scan event recorded with target and result",
        echoes_result: false,
    },
    Control {
        id: "AU-12",
        name: "Audit Record Generation",
        supported: Support::Yes,
        evidence: "Timestamped scan output and hash (if file)",
        echoes_result: false,
    },
    Control {
        id: "SC-7",
        name: "Boundary Protection",
        supported: Support::Partial,
        evidence: "Local execution only; no network scanning",
        echoes_result: false,
    },
];

/// One control in a mapping for a specific scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceEntry {
    /// Control identifier. Used as the map key when serialized.
    #[serde(skip)]
    pub control_id: &'static str,
    /// Control name.
    pub name: &'static str,
    /// Support level.
    pub supported: Support,
    /// Evidence text.
    pub evidence: &'static str,
    /// Echoed scan status, on the control that carries it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ScanStatus>,
}

/// Controls mapped for one scan, serialized as an ordered object keyed by
/// control id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceMapping {
    entries: Vec<ComplianceEntry>,
}

impl ComplianceMapping {
    /// Entries in report order.
    pub fn entries(&self) -> &[ComplianceEntry] {
        &self.entries
    }

    /// Looks up a control by id.
    pub fn get(&self, control_id: &str) -> Option<&ComplianceEntry> {
        self.entries.iter().find(|e| e.control_id == control_id)
    }
}

impl Serialize for ComplianceMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(entry.control_id, entry)?;
        }
        map.end()
    }
}

/// Maps a scan result onto the FedRAMP control table.
pub fn fedramp_mapping(result: &ScanResult) -> ComplianceMapping {
    map_status(result.status)
}

/// Maps a bare status onto the control table.
pub fn map_status(status: ScanStatus) -> ComplianceMapping {
    let entries = FEDRAMP_CONTROLS
        .iter()
        .map(|control| ComplianceEntry {
            control_id: control.id,
            name: control.name,
            supported: control.supported,
            evidence: control.evidence,
            result: control.echoes_result.then_some(status),
        })
        .collect();

    ComplianceMapping { entries }
}
