//! Page geometry in millimetres.
use serde::{de, Deserialize, Deserializer, Serialize};

/// Points per millimetre.
pub const MM_TO_PT: f32 = 72.0 / 25.4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn to_pt(self) -> Size {
        Size { width: self.width * MM_TO_PT, height: self.height * MM_TO_PT }
    }
}

/// Four-sided page margins.
#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Margins {
    pub fn all(value: f32) -> Self {
        Self { top: value, left: value, bottom: value, right: value }
    }

    /// Builds margins from `[top, left, bottom, right]`, the order export
    /// settings use.
    pub fn from_array(values: [f32; 4]) -> Self {
        Self { top: values[0], left: values[1], bottom: values[2], right: values[3] }
    }
}

impl<'de> Deserialize<'de> for Margins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MarginsVisitor;
        impl<'de> de::Visitor<'de> for MarginsVisitor {
            type Value = Margins;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a number, a [top, left, bottom, right] array or a map")
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Margins, E> {
                Ok(Margins::all(value as f32))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Margins, E> {
                Ok(Margins::all(value as f32))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Margins, E> {
                Ok(Margins::all(value as f32))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Margins, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut values = Vec::with_capacity(4);
                while let Some(value) = seq.next_element::<f32>()? {
                    values.push(value);
                }
                match values.as_slice() {
                    [all] => Ok(Margins::all(*all)),
                    [top, left, bottom, right] => Ok(Margins::from_array([*top, *left, *bottom, *right])),
                    _ => Err(de::Error::invalid_length(values.len(), &"1 or 4 margin values")),
                }
            }

            fn visit_map<A>(self, mut map: A) -> Result<Margins, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut margins = Margins::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "top" => margins.top = map.next_value()?,
                        "left" => margins.left = map.next_value()?,
                        "bottom" => margins.bottom = map.next_value()?,
                        "right" => margins.right = map.next_value()?,
                        _ => {
                            map.next_value::<de::IgnoredAny>()?;
                        }
                    }
                }
                Ok(margins)
            }
        }
        deserializer.deserialize_any(MarginsVisitor)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum PageFormat {
    #[default]
    A4,
    A3,
    Letter,
    Legal,
}

impl PageFormat {
    /// Portrait width and height in millimetres.
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            PageFormat::A4 => (210.0, 297.0),
            PageFormat::A3 => (297.0, 420.0),
            PageFormat::Letter => (215.9, 279.4),
            PageFormat::Legal => (215.9, 355.6),
        }
    }

    pub fn size(&self, orientation: Orientation) -> Size {
        let (width, height) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => Size::new(width, height),
            Orientation::Landscape => Size::new(height, width),
        }
    }
}
