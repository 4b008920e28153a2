//! Well-known satellite node IDs, exposed as `storj-id://<name>` resources.

pub const RESOURCE_SCHEME: &str = "storj-id://";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Satellite {
    pub name: &'static str,
    pub node_id: &'static str,
    pub address: &'static str,
}

pub const SATELLITES: &[Satellite] = &[
    Satellite {
        name: "us1",
        node_id: "12EayRS2V1kEsWESU9QMRseFhdxYxKicsiFmxrsLZHeLUtdps3S",
        address: "us1.storj.io:7777",
    },
    Satellite {
        name: "eu1",
        node_id: "12L9ZFwhzVpuEKMUNUqkaTLGzwY9G24tbiigLiXpmZWKwmcNDDs",
        address: "eu1.storj.io:7777",
    },
    Satellite {
        name: "ap1",
        node_id: "121RTSDpyNZVcEU84Ticf2L1ntiuUimbWgfATz21tuvgk3vzoA6",
        address: "ap1.storj.io:7777",
    },
    Satellite {
        name: "slc",
        node_id: "1wFTAgs9DP5RSnCqKV1eLf6N9wtk4EAtmN5DpSxcs8EjT69tGE",
        address: "saltlake.tardigrade.io:7777",
    },
    Satellite {
        name: "saltlake",
        node_id: "1wFTAgs9DP5RSnCqKV1eLf6N9wtk4EAtmN5DpSxcs8EjT69tGE",
        address: "saltlake.tardigrade.io:7777",
    },
];

impl Satellite {
    pub fn uri(&self) -> String {
        format!("{RESOURCE_SCHEME}{}", self.name)
    }

    pub fn title(&self) -> String {
        format!("{} Satellite ID", self.name.to_uppercase())
    }

    pub fn description(&self) -> String {
        format!("NodeID of Storj {} Satellite", self.name.to_uppercase())
    }

    pub fn node_url(&self) -> String {
        format!("{}@{}", self.node_id, self.address)
    }
}

/// Accepts a bare name (`us1`) or a resource URI (`storj-id://us1`),
/// case-insensitively.
pub fn lookup(key: &str) -> Option<&'static Satellite> {
    let name = key.strip_prefix(RESOURCE_SCHEME).unwrap_or(key);
    SATELLITES.iter().find(|satellite| satellite.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_accepts_name_and_uri() {
        assert_eq!(lookup("us1").map(|s| s.name), Some("us1"));
        assert_eq!(lookup("storj-id://EU1").map(|s| s.name), Some("eu1"));
        assert!(lookup("storj-id://mars").is_none());
    }

    #[test]
    fn aliases_share_node_id() {
        let slc = lookup("slc").expect("slc");
        let saltlake = lookup("saltlake").expect("saltlake");
        assert_eq!(slc.node_id, saltlake.node_id);
    }
}
