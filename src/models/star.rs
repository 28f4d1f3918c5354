use super::{ClusterId, RefId, StarId};
use crate::{
    config::OverwritePolicy,
    constants::{Degree, Hour},
};

/// Physical attributes a star can carry, each with its own error and reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StarField {
    Temperature,
    Logg,
    Metallicity,
    Mass,
    Radius,
    SpectralType,
    Vsini,
    Vsys,
    Parallax,
    Vmag,
    Kmag,
}

impl StarField {
    pub const ALL: [StarField; 11] = [
        StarField::Temperature,
        StarField::Logg,
        StarField::Metallicity,
        StarField::Mass,
        StarField::Radius,
        StarField::SpectralType,
        StarField::Vsini,
        StarField::Vsys,
        StarField::Parallax,
        StarField::Vmag,
        StarField::Kmag,
    ];

    /// Column stem used in logs and in the stored schema (`<name>`, `<name>_error`, `<name>_ref`).
    pub fn name(&self) -> &'static str {
        match self {
            StarField::Temperature => "temperature",
            StarField::Logg => "logg",
            StarField::Metallicity => "metallicity",
            StarField::Mass => "mass",
            StarField::Radius => "radius",
            StarField::SpectralType => "spectral_type",
            StarField::Vsini => "vsini",
            StarField::Vsys => "vsys",
            StarField::Parallax => "parallax",
            StarField::Vmag => "Vmag",
            StarField::Kmag => "Kmag",
        }
    }
}

impl std::fmt::Display for StarField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Stored value of one attribute: the value, its error and the owning reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute<T> {
    pub value: Option<T>,
    pub error: Option<f64>,
    pub reference: Option<RefId>,
}

impl<T> Default for Attribute<T> {
    fn default() -> Self {
        Attribute {
            value: None,
            error: None,
            reference: None,
        }
    }
}

impl<T> Attribute<T> {
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// Write a value with its error and reference.
    ///
    /// Under [`OverwritePolicy::KeepExisting`] an attribute that already holds a value
    /// is left untouched. Returns whether the attribute was written.
    pub fn fill(
        &mut self,
        value: T,
        error: Option<f64>,
        reference: RefId,
        policy: OverwritePolicy,
    ) -> bool {
        if self.is_set() && policy == OverwritePolicy::KeepExisting {
            return false;
        }
        self.value = Some(value);
        self.error = error;
        self.reference = Some(reference);
        true
    }
}

/// A star, created once per unique name and enriched additively.
///
/// `ra` is stored in **decimal hours**, as produced by parsing the sexagesimal
/// right ascension; `dec` is stored in **decimal degrees**.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub id: StarId,
    pub name: String,
    pub main_id: Option<String>,
    pub ra: Option<Hour>,
    pub dec: Option<Degree>,
    pub cluster: Option<ClusterId>,
    pub temperature: Attribute<f64>,
    pub logg: Attribute<f64>,
    pub metallicity: Attribute<f64>,
    pub mass: Attribute<f64>,
    pub radius: Attribute<f64>,
    pub spectral_type: Attribute<String>,
    pub vsini: Attribute<f64>,
    pub vsys: Attribute<f64>,
    pub parallax: Attribute<f64>,
    pub vmag: Attribute<f64>,
    pub kmag: Attribute<f64>,
}

impl Star {
    pub fn new(id: StarId, name: &str) -> Self {
        Star {
            id,
            name: name.to_string(),
            main_id: None,
            ra: None,
            dec: None,
            cluster: None,
            temperature: Attribute::default(),
            logg: Attribute::default(),
            metallicity: Attribute::default(),
            mass: Attribute::default(),
            radius: Attribute::default(),
            spectral_type: Attribute::default(),
            vsini: Attribute::default(),
            vsys: Attribute::default(),
            parallax: Attribute::default(),
            vmag: Attribute::default(),
            kmag: Attribute::default(),
        }
    }

    /// Numeric attribute for `field`; `None` for [`StarField::SpectralType`].
    pub fn numeric(&self, field: StarField) -> Option<&Attribute<f64>> {
        match field {
            StarField::Temperature => Some(&self.temperature),
            StarField::Logg => Some(&self.logg),
            StarField::Metallicity => Some(&self.metallicity),
            StarField::Mass => Some(&self.mass),
            StarField::Radius => Some(&self.radius),
            StarField::SpectralType => None,
            StarField::Vsini => Some(&self.vsini),
            StarField::Vsys => Some(&self.vsys),
            StarField::Parallax => Some(&self.parallax),
            StarField::Vmag => Some(&self.vmag),
            StarField::Kmag => Some(&self.kmag),
        }
    }

    pub fn numeric_mut(&mut self, field: StarField) -> Option<&mut Attribute<f64>> {
        match field {
            StarField::Temperature => Some(&mut self.temperature),
            StarField::Logg => Some(&mut self.logg),
            StarField::Metallicity => Some(&mut self.metallicity),
            StarField::Mass => Some(&mut self.mass),
            StarField::Radius => Some(&mut self.radius),
            StarField::SpectralType => None,
            StarField::Vsini => Some(&mut self.vsini),
            StarField::Vsys => Some(&mut self.vsys),
            StarField::Parallax => Some(&mut self.parallax),
            StarField::Vmag => Some(&mut self.vmag),
            StarField::Kmag => Some(&mut self.kmag),
        }
    }

    /// Reference owning `field`, whatever its type.
    pub fn reference_of(&self, field: StarField) -> Option<RefId> {
        match field {
            StarField::SpectralType => self.spectral_type.reference,
            other => self.numeric(other).and_then(|a| a.reference),
        }
    }
}

/// A named stellar cluster and the reference defining its membership.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub id: ClusterId,
    pub name: String,
    pub reference: Option<RefId>,
}
