use super::EncodeContext;
use crate::node_id::NodeId;

/// `None` unless the bytes are exactly one node ID.
pub fn encode_node_id(bytes: &[u8], _context: &EncodeContext<'_>) -> Option<String> {
    NodeId::from_bytes(bytes).ok().map(|id| id.to_string())
}

/// `<node id>@<host:port>`; needs the address the bytes were resolved from.
pub fn encode_node_url(bytes: &[u8], context: &EncodeContext<'_>) -> Option<String> {
    let address = context.address.filter(|address| address.contains(':'))?;
    let id = NodeId::from_bytes(bytes).ok()?;
    Some(format!("{id}@{address}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node_id::NODE_ID_SIZE;

    #[test]
    fn node_url_needs_address_context() {
        let bytes = [3u8; NODE_ID_SIZE];
        assert_eq!(encode_node_url(&bytes, &EncodeContext::default()), None);
        assert_eq!(encode_node_url(&bytes, &EncodeContext::with_address("no-port")), None);

        let rendered = encode_node_url(&bytes, &EncodeContext::with_address("127.0.0.1:7777"))
            .expect("rendered");
        let expected = encode_node_id(&bytes, &EncodeContext::default()).expect("node id");
        assert_eq!(rendered, format!("{expected}@127.0.0.1:7777"));
    }

    #[test]
    fn node_id_needs_exact_length() {
        assert_eq!(encode_node_id(&[1u8; 16], &EncodeContext::default()), None);
    }
}
