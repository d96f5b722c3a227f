// Records generated from the PCML descriptor of program `addr`.
// Do not edit by hand.

use pcml::core::Decimal;
use pcml::PcmlRecord;

/// Record for struct `home`.
#[derive(Debug, Clone, PartialEq, PcmlRecord)]
#[pcml(structure)]
pub struct Address {
    #[pcml(data(name = "city", usage = "inputoutput"))]
    city: String,
}

impl Address {
    /// Creates a record with every field at its initial value.
    #[must_use]
    pub fn new() -> Self {
        Self {
            city: Default::default(),
        }
    }

    /// Returns `city`.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Returns `city` mutably.
    pub fn city_mut(&mut self) -> &mut String {
        &mut self.city
    }

    /// Sets `city`.
    pub fn set_city(&mut self, value: String) {
        self.city = value;
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameter list of program `addr`.
#[derive(Debug, Clone, PartialEq, PcmlRecord)]
#[pcml(program(name = "addr", document = "META-INF.addr"))]
pub struct Addr {
    #[pcml(structure)]
    home: Address,
    #[pcml(data(name = "zip", usage = "input", length = 5, complete_with = "0"))]
    zip: String,
    #[pcml(array(name = "tags", size = 3, element = "char", usage = "inputoutput"))]
    tags: Vec<String>,
    #[pcml(data(name = "amount", usage = "output"))]
    amount: Decimal,
}

impl Addr {
    /// Creates a record with every field at its initial value.
    #[must_use]
    pub fn new() -> Self {
        Self {
            home: Address::new(),
            zip: Default::default(),
            tags: Default::default(),
            amount: Decimal::ZERO,
        }
    }

    /// Returns `home`.
    #[must_use]
    pub fn home(&self) -> &Address {
        &self.home
    }

    /// Returns `home` mutably.
    pub fn home_mut(&mut self) -> &mut Address {
        &mut self.home
    }

    /// Sets `home`.
    pub fn set_home(&mut self, value: Address) {
        self.home = value;
    }

    /// Returns `zip`.
    #[must_use]
    pub fn zip(&self) -> &str {
        &self.zip
    }

    /// Returns `zip` mutably.
    pub fn zip_mut(&mut self) -> &mut String {
        &mut self.zip
    }

    /// Sets `zip`.
    pub fn set_zip(&mut self, value: String) {
        self.zip = value;
    }

    /// Returns `tags`.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns `tags` mutably.
    pub fn tags_mut(&mut self) -> &mut Vec<String> {
        &mut self.tags
    }

    /// Sets `tags`.
    pub fn set_tags(&mut self, value: Vec<String>) {
        self.tags = value;
    }

    /// Returns `amount`.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns `amount` mutably.
    pub fn amount_mut(&mut self) -> &mut Decimal {
        &mut self.amount
    }

    /// Sets `amount`.
    pub fn set_amount(&mut self, value: Decimal) {
        self.amount = value;
    }
}

impl Default for Addr {
    fn default() -> Self {
        Self::new()
    }
}

