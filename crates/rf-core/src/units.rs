// rf-core/src/units.rs

use uom::si::f64::{
    AmountOfSubstance as UomAmountOfSubstance, Mass as UomMass, MassDensity as UomMassDensity,
    MolarMass as UomMolarMass, Volume as UomVolume,
};

// Public canonical unit types (SI, f64)
pub type Mass = UomMass;
pub type Volume = UomVolume;
pub type Density = UomMassDensity;
pub type MolarMass = UomMolarMass;
pub type Moles = UomAmountOfSubstance;

#[inline]
pub fn g(v: f64) -> Mass {
    use uom::si::mass::gram;
    Mass::new::<gram>(v)
}

#[inline]
pub fn ml(v: f64) -> Volume {
    use uom::si::volume::milliliter;
    Volume::new::<milliliter>(v)
}

// g/mL and g/cm^3 are the same unit; inventory sheets quote g/mL.
#[inline]
pub fn g_per_ml(v: f64) -> Density {
    use uom::si::mass_density::gram_per_cubic_centimeter;
    Density::new::<gram_per_cubic_centimeter>(v)
}

#[inline]
pub fn g_per_mol(v: f64) -> MolarMass {
    use uom::si::molar_mass::gram_per_mole;
    MolarMass::new::<gram_per_mole>(v)
}

#[inline]
pub fn as_g(v: Mass) -> f64 {
    use uom::si::mass::gram;
    v.get::<gram>()
}

#[inline]
pub fn as_ml(v: Volume) -> f64 {
    use uom::si::volume::milliliter;
    v.get::<milliliter>()
}

#[inline]
pub fn as_liters(v: Volume) -> f64 {
    use uom::si::volume::liter;
    v.get::<liter>()
}

#[inline]
pub fn as_moles(v: Moles) -> f64 {
    use uom::si::amount_of_substance::mole;
    v.get::<mole>()
}
