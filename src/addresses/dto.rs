use serde::{Deserialize, Serialize};

use crate::addresses::repo_types::Address;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddressDto {
    pub id: Option<i64>,
    pub street: String,
    pub number_house: i32,
    pub city: String,
    pub postal_index: String,
    #[serde(default)]
    pub active: bool,
}

impl AddressDto {
    pub fn into_entity(self) -> Address {
        Address {
            id: self.id.unwrap_or(0),
            street: self.street,
            number_house: self.number_house,
            city: self.city,
            postal_index: self.postal_index,
            active: self.active,
        }
    }

    /// Merge into an existing row, keeping the identifier.
    pub fn apply_to(&self, address: &mut Address) {
        self.street.clone_into(&mut address.street);
        address.number_house = self.number_house;
        self.city.clone_into(&mut address.city);
        self.postal_index.clone_into(&mut address.postal_index);
    }
}

impl From<&Address> for AddressDto {
    fn from(address: &Address) -> Self {
        Self {
            id: Some(address.id),
            street: address.street.clone(),
            number_house: address.number_house,
            city: address.city.clone(),
            postal_index: address.postal_index.clone(),
            active: address.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_to_keeps_identifier() {
        let mut address = Address {
            id: 11,
            street: "Oak".into(),
            number_house: 1,
            city: "Springfield".into(),
            postal_index: "00001".into(),
            active: true,
        };
        let dto = AddressDto {
            id: None,
            street: "Elm".into(),
            number_house: 5,
            city: "Springfield".into(),
            postal_index: "00002".into(),
            active: false,
        };

        dto.apply_to(&mut address);
        assert_eq!(address.id, 11);
        assert_eq!(address.street, "Elm");
        assert_eq!(address.number_house, 5);
        assert_eq!(address.postal_index, "00002");
    }
}
