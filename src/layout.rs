/*!

Byte layout of documents, and the canonical order of types.

All multi-byte integers and floats are little-endian.

# Documents

```text
+----------+----------+----------+----------+==========+----------+
| LLLLLLLL | LLLLLLLL | LLLLLLLL | LLLLLLLL | Elements | 00000000 |
+----------+----------+----------+----------+==========+----------+

- LLLL... is a 32-bit signed integer: the total length of the document, counting
    the length itself and the terminating zero byte.
```

The smallest document is the empty one, `05 00 00 00 00`. Documents larger than
[`MAX_DOC_SIZE`](crate::MAX_DOC_SIZE) are rejected, and validation from raw bytes
stops descending after [`MAX_DEPTH`](crate::MAX_DEPTH) levels of nesting.

# Elements

```text
+----------+==========+----------+=========+
|   Tag    |   Name   | 00000000 | Payload |
+----------+==========+----------+=========+
```

The name is UTF-8 and may not contain a zero byte. It may be empty. Names are not
required to be unique within a document.

| Tag  | Type        | Payload                                                  |
| --   | --          | --                                                       |
| 0x01 | Double      | 8-byte IEEE 754 double                                   |
| 0x02 | String      | String (see below)                                       |
| 0x03 | Object      | Embedded document                                        |
| 0x04 | Array       | Embedded document, names "0", "1", ... by position       |
| 0x05 | Binary      | 32-bit length, subtype byte, then the bytes              |
| 0x06 | Undefined   | Empty                                                    |
| 0x07 | ObjectId    | 12 bytes                                                 |
| 0x08 | Bool        | One byte, 0 or 1                                         |
| 0x09 | Date        | 64-bit signed milliseconds since the Unix epoch          |
| 0x0A | Null        | Empty                                                    |
| 0x0B | Regex       | Pattern then flags, each a zero-terminated string        |
| 0x0C | DbRef       | String namespace, then a 12-byte ObjectId                |
| 0x0D | Code        | String                                                   |
| 0x0E | Symbol      | String                                                   |
| 0x0F | CodeWScope  | 32-bit total length, String code, embedded document      |
| 0x10 | Int32       | 32-bit signed integer                                    |
| 0x11 | Timestamp   | 32-bit increment, then 32-bit seconds                    |
| 0x12 | Int64       | 64-bit signed integer                                    |
| 0x7F | MaxKey      | Empty                                                    |
| 0xFF | MinKey      | Empty                                                    |

Tag 0x00 only appears as a document terminator.

A String is a 32-bit signed length counting the terminating zero, the UTF-8
bytes, then a zero byte. The empty string is `01 00 00 00 00`.

# Canonical Order

Values of different types compare by type rank first:

| Rank | Types                    | Minimum              | Maximum                  |
| --   | --                       | --                   | --                       |
| -1   | MinKey                   | MinKey               | MinKey                   |
| 0    | Undefined                | Undefined            | Undefined                |
| 5    | Null                     | Null                 | Null                     |
| 10   | Double, Int32, Int64     | Double -f64::MAX     | Double f64::MAX          |
| 15   | String, Symbol           | String ""            | min of Object            |
| 20   | Object                   | {}                   | min of Array             |
| 25   | Array                    | []                   | min of Binary            |
| 30   | Binary                   | empty, subtype 0     | min of ObjectId          |
| 35   | ObjectId                 | all zero bytes       | all 0xFF bytes           |
| 40   | Bool                     | false                | true                     |
| 45   | Date                     | Bool true            | i64::MAX                 |
| 47   | Timestamp                | (0, 0)               | (i32::MAX, i32::MAX)     |
| 50   | Regex                    | ("", "")             | min of DbRef             |
| 55   | DbRef                    | ("", zero id)        | min of Code              |
| 60   | Code                     | ""                   | min of CodeWScope        |
| 65   | CodeWScope               | ("", {})             | MaxKey                   |
| 127  | MaxKey                   | MaxKey               | MaxKey                   |

"min of X" means the maximum is written with exactly the same bytes as the
minimum of the next type, so that adjacent ranges meet without a gap. The table
lives in code as [`CANONICAL_ORDER`](crate::CANONICAL_ORDER).

The Date minimum is one slot lower than Date itself: no Date value can sort below
`true`, and no Bool value above it.

Within a rank, numbers compare numerically across widths with NaN below every
other number. Strings, symbols, and code compare bytewise. Documents compare
element by element (rank, then name, then value), and a prefix sorts first.
Binary compares by length, then subtype, then bytes.

*/
