//! Static code tables
//!
//! Result codes produced locally by this crate, and the enumerations the
//! Zabbix API uses for item types, item value types and interface types.
//! The API enumerations serialize as their integer code so they can be put
//! straight into request params.

use serde::{Serialize, Serializer};

/// Result codes that are not on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    Success,
    /// Parameter errors: 10001-19999
    ParamIsInvalid,
}

impl ResultCode {
    pub fn code(&self) -> i32 {
        match self {
            ResultCode::Success => 0,
            ResultCode::ParamIsInvalid => 10001,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ResultCode::Success => "Success",
            ResultCode::ParamIsInvalid => "Param is invalid.",
        }
    }
}

/// Generates a code-backed enum with `code()`, `description()`, `TryFrom<i64>`
/// and integer serialization.
macro_rules! code_table {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident = $code:literal => $desc:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Every value, in code order
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Integer code used by the API
            pub fn code(&self) -> i64 {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            /// Human-readable description
            pub fn description(&self) -> &'static str {
                match self {
                    $($name::$variant => $desc,)+
                }
            }
        }

        impl TryFrom<i64> for $name {
            type Error = crate::Error;

            fn try_from(code: i64) -> crate::Result<Self> {
                match code {
                    $($code => Ok($name::$variant),)+
                    other => Err(crate::Error::InvalidParams(format!(
                        "unknown {} code {}",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_i64(self.code())
            }
        }

        impl From<$name> for serde_json::Value {
            fn from(value: $name) -> Self {
                serde_json::Value::from(value.code())
            }
        }
    };
}

code_table! {
    /// Type of an item (`type` property of `item.create`)
    pub enum ItemType {
        ZabbixAgent = 0 => "Zabbix agent",
        SnmpV1Agent = 1 => "SNMPv1 agent",
        ZabbixTrapper = 2 => "Zabbix trapper",
        SimpleCheck = 3 => "simple check",
        SnmpV2Agent = 4 => "SNMPv2 agent",
        ZabbixInternal = 5 => "Zabbix internal",
        SnmpV3Agent = 6 => "SNMPv3 agent",
        ZabbixAgentActive = 7 => "Zabbix agent (active)",
        ZabbixAggregate = 8 => "Zabbix aggregate",
        WebItem = 9 => "web item",
        ExternalCheck = 10 => "external check",
        DatabaseMonitor = 11 => "database monitor",
        IpmiAgent = 12 => "IPMI agent",
        SshAgent = 13 => "SSH agent",
        TelnetAgent = 14 => "TELNET agent",
        Calculated = 15 => "calculated",
        JmxAgent = 16 => "JMX agent",
        SnmpTrap = 17 => "SNMP trap",
    }
}

code_table! {
    /// Type of information an item stores (`value_type`)
    pub enum ItemValueType {
        NumericFloat = 0 => "numeric float",
        Character = 1 => "character",
        Log = 2 => "log",
        NumericUnsigned = 3 => "numeric unsigned",
        Text = 4 => "text",
    }
}

code_table! {
    /// Host interface type (`type` property of `hostinterface.create`)
    pub enum InterfaceType {
        Agent = 1 => "agent",
        Snmp = 2 => "SNMP",
        Ipmi = 3 => "IPMI",
        Jmx = 4 => "JMX",
    }
}
