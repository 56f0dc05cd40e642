/*!

The binary and JSON formats used by term queries.

# Values

Every value is one marker byte, followed by a payload. Multi-byte numbers are
little-endian.

| Marker        | Kind   | Payload                                  |
| --            | --     | --                                       |
| `0xa0`-`0xbf` | FixStr | UTF-8, length (0-31) in the low 5 bits   |
| `0xc0`        | Null   | none                                     |
| `0xc2`        | False  | none                                     |
| `0xc3`        | True   | none                                     |
| `0xc4`        | Bin8   | 1-byte length, then bytes                |
| `0xc5`        | Bin16  | 2-byte length, then bytes                |
| `0xc6`        | Bin32  | 4-byte length, then bytes                |
| `0xca`        | F32    | 4 bytes, IEEE 754 bits                   |
| `0xcb`        | F64    | 8 bytes, IEEE 754 bits                   |
| `0xd2`        | I32    | 4 bytes, two's complement                |
| `0xd3`        | I64    | 8 bytes, two's complement                |
| `0xd9`        | Str8   | 1-byte length, then UTF-8                |
| `0xda`        | Str16  | 2-byte length, then UTF-8                |
| `0xdb`        | Str32  | 4-byte length, then UTF-8                |

All other marker bytes are reserved, and decoding fails on them.

The markers are borrowed from MessagePack, but the format is narrower in a few
ways, all so that one value has one encoding:

- Str and Bin use the shortest available length prefix. A Str8 holding 10 bytes
    is an error, not an alternate spelling of a FixStr.
- Integers are fixed-width by kind. An I32 is always 5 bytes and decodes back to
    an I32, never to an I64, and the reverse holds too. There is no compacted
    integer encoding.
- F32 and F64 are separate kinds.
- Str must be valid UTF-8.
- No Str or Bin payload may exceed [`MAX_VALUE_SIZE`][crate::MAX_VALUE_SIZE].

# Term Queries

A term query's body is its field name as a Str, then its value. Text values
are stored as bytes, so they are written as Bin:

```text
+=============+=======+
| Field (Str) | Value |
+=============+=======+
```

The body is followed by the fields common to all queries: the boost as an F32,
then the query name as a Str, or Null if there is none.

```text
+=============+=======+=============+==================+
| Field (Str) | Value | Boost (F32) | Name (Str, Null) |
+=============+=======+=============+==================+
```

As an example, `TermQueryBuilder::new("f", "abc")` with the default boost and no
name encodes as:

```text
a1 66             "f"
c4 03 61 62 63    Bin "abc"
ca 00 00 80 3f    1.0
c0                Null
```

## Named Queries

When the reader doesn't know which query kind comes next, the query is
preceded by its type name as a Str (`"term"`, `"span_term"`).
[`QueryRegistry`][crate::QueryRegistry] uses the name to pick a decoder.

# JSON

Queries render as an object keyed by the type name, holding an object keyed by
the field name:

```json
{ "term": { "user.id": { "value": "abc", "boost": 2.0, "_name": "my_query" } } }
```

`value` is always the logical value: text that is stored as bytes is shown as
a string. `boost` only appears when it isn't 1.0, and `_name` only when set.

Numbers are written in their shortest decimal form, so an F32 `0.1` renders as
`0.1`. JSON can't hold NaN or infinities, so a query whose value or boost is
one of them fails to render. It still encodes to binary as usual.

*/
