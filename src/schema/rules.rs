// ==========================================
// 分析配置校验器 - 规则表
// ==========================================
// 职责: 以静态规则表描述配置文档允许的结构
// 语义: JSON-Schema draft-07 的 additionalProperties / required /
//       enum / dependencies / $ref 子集
// ==========================================

use std::fmt;

// ==========================================
// Literal - 枚举字面量
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal {
    Str(&'static str),
    Int(i64),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Str(s) => write!(f, "{}", s),
            Literal::Int(i) => write!(f, "{}", i),
        }
    }
}

// ==========================================
// FieldRule - 字段规则
// ==========================================
#[derive(Debug, Clone, Copy)]
pub enum FieldRule {
    /// 任意对象，不再约束内部结构
    AnyObject,
    String,
    Number,
    Integer,
    /// 数值或字符串（角度等带单位的量）
    StringOrNumber,
    /// 取值必须属于字面量集合
    Enum(&'static [Literal]),
    Array {
        items: &'static FieldRule,
        min_items: Option<usize>,
        max_items: Option<usize>,
    },
    Object(&'static ObjectRule),
}

// ==========================================
// ObjectRule - 对象规则
// ==========================================
#[derive(Debug)]
pub struct ObjectRule {
    /// 作为 `#/definitions/<name>` 引用时的定义名
    pub definition: Option<&'static str>,
    pub properties: &'static [(&'static str, FieldRule)],
    pub required: &'static [&'static str],
    /// (键, 缺省时采用的值)；带默认值的必填键可以省略
    pub defaults: &'static [(&'static str, Literal)],
    /// (键, 该键出现时必须同时出现的键)
    pub dependencies: &'static [(&'static str, &'static [&'static str])],
    pub additional_properties: bool,
}

impl ObjectRule {
    pub fn property(&self, key: &str) -> Option<&FieldRule> {
        self.properties
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, rule)| rule)
    }

    pub fn default_for(&self, key: &str) -> Option<Literal> {
        self.defaults
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, literal)| *literal)
    }

    /// 文档中必须显式出现的键（必填且无默认值）
    pub fn enforced_required(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.required
            .iter()
            .copied()
            .filter(move |key| self.default_for(key).is_none())
    }

    pub fn property_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.properties.iter().map(|(name, _)| *name)
    }
}

// ==========================================
// 字面量集合
// ==========================================

pub const LOG_LEVELS: &[Literal] = &[
    Literal::Str("CRITICAL"),
    Literal::Int(50),
    Literal::Str("ERROR"),
    Literal::Int(40),
    Literal::Str("WARNING"),
    Literal::Int(30),
    Literal::Str("INFO"),
    Literal::Int(20),
    Literal::Str("DEBUG"),
    Literal::Int(10),
    Literal::Str("NOTSET"),
];

pub const FILTER_TYPES: &[Literal] = &[
    Literal::Str("sky_circle"),
    Literal::Str("angle_box"),
    Literal::Str("quantity_box"),
    Literal::Str("par_box"),
    Literal::Str("ids"),
];

pub const SKY_FRAMES: &[Literal] = &[
    Literal::Str("galactic"),
    Literal::Str("equatorial"),
    Literal::Str("icrs"),
    Literal::Str("fk5"),
];

// ==========================================
// 对象规则
// ==========================================

pub static LOGGING: ObjectRule = ObjectRule {
    definition: None,
    properties: &[
        ("level", FieldRule::Enum(LOG_LEVELS)),
        ("filename", FieldRule::String),
        ("filemode", FieldRule::String),
        ("format", FieldRule::String),
        ("datefmt", FieldRule::String),
    ],
    required: &["level"],
    defaults: &[("level", Literal::Str("INFO"))],
    dependencies: &[("filemode", &["filename"])],
    additional_properties: false,
};

pub static GENERAL: ObjectRule = ObjectRule {
    definition: None,
    properties: &[
        ("out_folder", FieldRule::String),
        ("logging", FieldRule::Object(&LOGGING)),
    ],
    required: &[],
    defaults: &[("out_folder", Literal::Str("."))],
    dependencies: &[],
    additional_properties: false,
};

pub static OBSERVATIONS_FILTER: ObjectRule = ObjectRule {
    definition: Some("observations_filter"),
    properties: &[
        ("filter_type", FieldRule::Enum(FILTER_TYPES)),
        ("lon", FieldRule::StringOrNumber),
        ("lat", FieldRule::StringOrNumber),
        ("radius", FieldRule::StringOrNumber),
        ("border", FieldRule::StringOrNumber),
        ("variable", FieldRule::String),
        (
            "value_range",
            FieldRule::Array {
                items: &FieldRule::Number,
                min_items: Some(2),
                max_items: Some(2),
            },
        ),
        (
            "obs_ids",
            FieldRule::Array {
                items: &FieldRule::Integer,
                min_items: None,
                max_items: None,
            },
        ),
        ("frame", FieldRule::Enum(SKY_FRAMES)),
    ],
    required: &[],
    defaults: &[],
    dependencies: &[],
    additional_properties: false,
};

pub static OBSERVATIONS: ObjectRule = ObjectRule {
    definition: None,
    properties: &[
        ("data_store", FieldRule::String),
        (
            "filter",
            FieldRule::Array {
                items: &FieldRule::Object(&OBSERVATIONS_FILTER),
                min_items: None,
                max_items: None,
            },
        ),
    ],
    required: &[],
    defaults: &[],
    dependencies: &[],
    additional_properties: false,
};

/// 配置文档根规则
pub static ROOT: ObjectRule = ObjectRule {
    definition: None,
    properties: &[
        ("general", FieldRule::Object(&GENERAL)),
        ("observations", FieldRule::Object(&OBSERVATIONS)),
        ("grid", FieldRule::AnyObject),
        ("model", FieldRule::AnyObject),
        ("analysis", FieldRule::AnyObject),
    ],
    required: &["general"],
    defaults: &[],
    dependencies: &[],
    additional_properties: false,
};
