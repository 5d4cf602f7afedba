// Mon Jan 19 2026 - Alex

use crate::structure::{BitField, LayoutContractError, LayoutField, StructLayout, StructureError};
use serde::{Deserialize, Serialize};

/// Layout JSON as exchanged with layout producers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub struct_name: Option<String>,
    pub total_size: i64,
    pub max_align: i64,
    #[serde(default)]
    pub pack_value: Option<i64>,
    #[serde(default)]
    pub fields: Vec<SerializableField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableField {
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_name: String,
    pub offset: i64,
    pub size: i64,
    #[serde(default)]
    pub padding_before: i64,
    #[serde(default)]
    pub is_pointer: bool,
    #[serde(default)]
    pub is_array: bool,
    #[serde(default = "default_count")]
    pub count: i64,
    #[serde(default)]
    pub bit_fields: Option<Vec<SerializableBitField>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableBitField {
    pub name: String,
    pub bits: i64,
}

fn default_count() -> i64 {
    1
}

fn non_negative(what: &str, value: i64) -> Result<usize, LayoutContractError> {
    usize::try_from(value).map_err(|_| LayoutContractError::NegativeValue {
        what: what.to_string(),
        value,
    })
}

impl SerializableLayout {
    pub fn from_json(json: &str) -> Result<Self, StructureError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, StructureError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, StructureError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Converts into the in-memory model. Only sign checks happen here.
    pub fn into_layout(self) -> Result<StructLayout, LayoutContractError> {
        let total_size = non_negative("total_size", self.total_size)?;
        let max_align = non_negative("max_align", self.max_align)?;
        let pack_value = self
            .pack_value
            .map(|pack| non_negative("pack_value", pack))
            .transpose()?;

        let fields = self
            .fields
            .into_iter()
            .map(SerializableField::into_field)
            .collect::<Result<Vec<_>, _>>()?;

        let layout = StructLayout::new(total_size, max_align)
            .with_pack_value(pack_value)
            .with_fields(fields);

        Ok(match self.struct_name {
            Some(name) => layout.with_name(name),
            None => layout,
        })
    }
}

impl SerializableField {
    fn into_field(self) -> Result<LayoutField, LayoutContractError> {
        let offset = non_negative(&format!("{}.offset", self.name), self.offset)?;
        let size = non_negative(&format!("{}.size", self.name), self.size)?;
        let padding = non_negative(&format!("{}.padding_before", self.name), self.padding_before)?;
        let count = non_negative(&format!("{}.count", self.name), self.count)?;

        let bit_fields = self
            .bit_fields
            .unwrap_or_default()
            .into_iter()
            .map(|bit| {
                let bits = u32::try_from(bit.bits).map_err(|_| LayoutContractError::NegativeValue {
                    what: format!("{}.bits", bit.name),
                    value: bit.bits,
                })?;
                Ok(BitField::new(bit.name, bits))
            })
            .collect::<Result<Vec<_>, LayoutContractError>>()?;

        Ok(LayoutField::new(self.name, offset, size)
            .with_type_name(self.type_name)
            .with_padding_before(padding)
            .with_pointer(self.is_pointer)
            .with_array(self.is_array, count)
            .with_bit_fields(bit_fields))
    }
}

impl From<&StructLayout> for SerializableLayout {
    fn from(layout: &StructLayout) -> Self {
        Self {
            struct_name: layout.name().map(str::to_string),
            total_size: layout.total_size() as i64,
            max_align: layout.max_align() as i64,
            pack_value: layout.pack_value().map(|p| p as i64),
            fields: layout
                .fields()
                .iter()
                .map(|f| SerializableField {
                    name: f.name().to_string(),
                    type_name: f.type_name().to_string(),
                    offset: f.offset() as i64,
                    size: f.size() as i64,
                    padding_before: f.padding_before() as i64,
                    is_pointer: f.is_pointer(),
                    is_array: f.is_array(),
                    count: f.count() as i64,
                    bit_fields: if f.bit_fields().is_empty() {
                        None
                    } else {
                        Some(
                            f.bit_fields()
                                .iter()
                                .map(|b| SerializableBitField {
                                    name: b.name.clone(),
                                    bits: i64::from(b.bits),
                                })
                                .collect(),
                        )
                    },
                })
                .collect(),
        }
    }
}
