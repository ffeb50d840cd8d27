//! SI base and derived units plus a handful of physical constants,
//! built once from the unit and quantity algebra.

use crate::quantity::Quantity;
use crate::unit::Unit;
use crate::value::Value;
use std::f64::consts::PI;
use std::sync::OnceLock;

/// Names accepted by [`lookup`], in catalogue order.
pub const NAMES: [&str; 23] = [
    "kg", "m", "s", "A", "K", "mol", "cd", "J", "N", "u", "eV", "c", "G", "h", "hb", "mu0", "e0",
    "e", "m_e", "m_p", "m_n", "m_u", "J_eV",
];

/// Read-only catalogue of units and constants (CODATA 2014 values).
#[derive(Debug, Clone)]
pub struct Catalogue {
    pub kilogram: Unit,
    pub metre: Unit,
    pub second: Unit,
    pub ampere: Unit,
    pub kelvin: Unit,
    pub mole: Unit,
    pub candela: Unit,
    /// kg m^2 s^-2
    pub joule: Unit,
    /// kg m s^-2
    pub newton: Unit,
    /// Atomic mass unit tag, not decomposed.
    pub atomic_mass: Unit,
    /// Electronvolt tag, not decomposed.
    pub electronvolt: Unit,
    /// Speed of light in vacuum.
    pub c: Quantity,
    /// Gravitational constant.
    pub g: Quantity,
    /// Planck constant.
    pub h: Quantity,
    /// Reduced Planck constant, h / 2π.
    pub hbar: Quantity,
    /// Vacuum permeability.
    pub mu0: Quantity,
    /// Vacuum permittivity, (μ0 c²)⁻¹.
    pub epsilon0: Quantity,
    /// Elementary charge.
    pub e: Quantity,
    pub electron_mass: Quantity,
    pub proton_mass: Quantity,
    pub neutron_mass: Quantity,
    /// Kilograms per atomic mass unit.
    pub atomic_mass_constant: Quantity,
    /// Joules per electronvolt.
    pub joule_per_ev: Quantity,
}

impl Catalogue {
    fn build() -> Self {
        let kilogram = Unit::base("kg");
        let metre = Unit::base("m");
        let second = Unit::base("s");
        let ampere = Unit::base("A");
        let kelvin = Unit::base("K");
        let mole = Unit::base("mol");
        let candela = Unit::base("cd");

        let joule = &(&kilogram * &metre.powi(2)) / &second.powi(2);
        let newton = &(&kilogram * &metre) / &second.powi(2);
        let atomic_mass = Unit::base("u");
        let electronvolt = Unit::base("eV");

        let c = Quantity::new(299_792_458.0, &metre / &second);
        let g = Quantity::new(
            6.67408e-11,
            &(&metre.powi(3) / &kilogram) / &second.powi(2),
        );
        let h = Quantity::new(6.626070040e-34, &joule * &second);
        let hbar = (&h / (2.0 * PI)).into_quantity();
        let mu0 = Quantity::new(4.0 * PI * 1e-7, &newton / &ampere.powi(2));
        let epsilon0 = (Value::from(mu0.clone()) * c.powi(2)).powi(-1).into_quantity();
        let e = Quantity::new(1.6021766208e-19, &ampere * &second);
        let electron_mass = Quantity::new(9.10938356e-31, kilogram.clone());
        let proton_mass = Quantity::new(1.672621898e-27, kilogram.clone());
        let neutron_mass = Quantity::new(1.674927471e-27, kilogram.clone());
        let atomic_mass_constant = Quantity::new(1.660539040e-27, &kilogram / &atomic_mass);
        let per_ev = &(&joule / &(&ampere * &second)) / &electronvolt;
        let joule_per_ev = (&e * &Quantity::new(1.0, per_ev)).into_quantity();

        tracing::debug!(entries = NAMES.len(), "built unit catalogue");

        Self {
            kilogram,
            metre,
            second,
            ampere,
            kelvin,
            mole,
            candela,
            joule,
            newton,
            atomic_mass,
            electronvolt,
            c,
            g,
            h,
            hbar,
            mu0,
            epsilon0,
            e,
            electron_mass,
            proton_mass,
            neutron_mass,
            atomic_mass_constant,
            joule_per_ev,
        }
    }

    /// Looks an entry up by its conventional symbol, e.g. `"mu0"` or `"J_eV"`.
    pub fn get(&self, name: &str) -> Option<Value> {
        let unit = |u: &Unit| Some(Value::Unit(u.clone()));
        let quantity = |q: &Quantity| Some(Value::Quantity(q.clone()));
        match name {
            "kg" => unit(&self.kilogram),
            "m" => unit(&self.metre),
            "s" => unit(&self.second),
            "A" => unit(&self.ampere),
            "K" => unit(&self.kelvin),
            "mol" => unit(&self.mole),
            "cd" => unit(&self.candela),
            "J" => unit(&self.joule),
            "N" => unit(&self.newton),
            "u" => unit(&self.atomic_mass),
            "eV" => unit(&self.electronvolt),
            "c" => quantity(&self.c),
            "G" => quantity(&self.g),
            "h" => quantity(&self.h),
            "hb" => quantity(&self.hbar),
            "mu0" => quantity(&self.mu0),
            "e0" => quantity(&self.epsilon0),
            "e" => quantity(&self.e),
            "m_e" => quantity(&self.electron_mass),
            "m_p" => quantity(&self.proton_mass),
            "m_n" => quantity(&self.neutron_mass),
            "m_u" => quantity(&self.atomic_mass_constant),
            "J_eV" => quantity(&self.joule_per_ev),
            _ => None,
        }
    }
}

static CATALOGUE: OnceLock<Catalogue> = OnceLock::new();

/// The process-wide catalogue, built on first use.
pub fn catalogue() -> &'static Catalogue {
    CATALOGUE.get_or_init(Catalogue::build)
}

pub fn lookup(name: &str) -> Option<Value> {
    catalogue().get(name)
}

pub fn names() -> &'static [&'static str] {
    &NAMES
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn base_units_have_a_single_dimension() {
        let cat = catalogue();
        for (unit, symbol) in [
            (&cat.kilogram, "kg"),
            (&cat.metre, "m"),
            (&cat.second, "s"),
            (&cat.ampere, "A"),
            (&cat.kelvin, "K"),
            (&cat.mole, "mol"),
            (&cat.candela, "cd"),
        ] {
            assert_eq!(unit.degree(), 1);
            assert_eq!(unit.exponent(symbol), 1);
        }
    }

    #[test]
    fn derived_units_match_their_definitions() {
        let cat = catalogue();
        let kg = Unit::base("kg");
        let m = Unit::base("m");
        let s = Unit::base("s");
        assert_eq!(cat.joule, &(&kg * &m.powi(2)) / &s.powi(2));
        assert_eq!(cat.joule.to_string(), "[kg m^2 s^-2]");
        assert_eq!(cat.newton.to_string(), "[kg m s^-2]");
    }

    #[test]
    fn vacuum_permittivity_inverts_mu0_c_squared() {
        let cat = catalogue();
        let velocity = &cat.metre / &cat.second;
        let expected_unit = (&(&cat.newton / &cat.ampere.powi(2)) * &velocity.powi(2)).recip();

        assert_eq!(cat.epsilon0.unit(), &expected_unit);
        assert_eq!(cat.epsilon0.unit().to_string(), "[A^2 kg^-1 m^-3 s^4]");
        assert_relative_eq!(cat.epsilon0.value(), 8.854187817e-12, max_relative = 1e-9);
    }

    #[test]
    fn reduced_planck_constant_keeps_the_action_unit() {
        let cat = catalogue();
        assert_eq!(cat.hbar.unit(), cat.h.unit());
        assert_relative_eq!(cat.hbar.value(), 1.0545718e-34, max_relative = 1e-7);
    }

    #[test]
    fn joule_per_electronvolt_carries_the_charge_value() {
        let cat = catalogue();
        assert_eq!(cat.joule_per_ev.value(), 1.6021766208e-19);
        assert_eq!(
            cat.joule_per_ev.unit(),
            &(&cat.joule / &cat.electronvolt)
        );
        assert_eq!(cat.atomic_mass_constant.unit().to_string(), "[kg u^-1]");
    }

    #[test]
    fn every_name_resolves() {
        for name in names() {
            assert!(lookup(name).is_some(), "missing catalogue entry {name}");
        }
        assert_eq!(lookup("mu0"), Some(Value::Quantity(catalogue().mu0.clone())));
        assert!(lookup("furlong").is_none());
    }

    #[test]
    fn catalogue_is_shared_across_threads() {
        let here = catalogue() as *const Catalogue as usize;
        let there = std::thread::spawn(|| catalogue() as *const Catalogue as usize)
            .join()
            .expect("thread should finish");
        assert_eq!(here, there);
    }
}
